//! Request/response logging middleware.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::{error, info};

use crate::error::InternalErrorDetail;

/// Logs request method, path, status, and duration, plus the detail of
/// any server-side failure that was hidden from the client.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    if let Some(InternalErrorDetail(detail)) = response.extensions().get::<InternalErrorDetail>() {
        error!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            error = %detail,
            "Internal server error"
        );
    }

    info!(
        method = %method,
        path = %uri.path(),
        status = status.as_u16(),
        duration_ms = duration.as_millis() as u64,
        "HTTP request"
    );

    response
}
