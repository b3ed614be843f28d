//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use shiftdesk_core::error::AppError;

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Stable numeric error code.
    pub code: u32,
    /// Machine-readable error kind.
    pub error: String,
    /// Human-readable message. Generic for server-side failures.
    pub message: String,
}

/// Detail of a server-side failure, attached to the response for the
/// request logger and never serialized to the client.
#[derive(Debug, Clone)]
pub struct InternalErrorDetail(pub String);

/// HTTP-facing wrapper around [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = StatusCode::from_u16(err.kind.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = ApiErrorResponse {
            code: err.kind.client_code(),
            error: err.kind.to_string(),
            message: err.client_message().to_string(),
        };

        let mut response = (status, Json(body)).into_response();
        if err.kind.is_server_side() {
            let detail = match std::error::Error::source(&err) {
                Some(source) => format!("{}: {source}", err.message),
                None => err.message.clone(),
            };
            response
                .extensions_mut()
                .insert(InternalErrorDetail(detail));
        }
        response
    }
}
