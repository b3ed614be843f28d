//! Request authenticator: verifies the bearer access token and attaches
//! the caller to the request.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use shiftdesk_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::Requester;
use crate::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Bearer token from the `Authorization` header.
///
/// `Ok(None)` when the header is absent; an error when it is present but
/// not a bearer credential.
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AppError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| AppError::unauthenticated("Authorization header is not valid ASCII"))?;
    let token = value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::unauthenticated("Authorization header must be 'Bearer <token>'"))?;
    Ok(Some(token))
}

/// Rejects the request unless it carries a valid, unexpired access token.
///
/// On success a [`Requester`] is inserted into the request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())?
        .ok_or_else(|| AppError::unauthenticated("Authorization header is missing"))?;

    let claims = state.issuer().parse_access_token(token)?;
    let requester = Requester {
        id: claims.user_id()?,
        role: claims.role,
        level: claims.level,
    };

    request.extensions_mut().insert(requester);
    Ok(next.run(request).await)
}
