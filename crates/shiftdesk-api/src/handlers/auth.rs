//! Auth handlers: login, logout, refresh.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use shiftdesk_core::error::AppError;

use crate::dto::request::LoginRequest;
use crate::dto::response::{ApiResponse, LoginResponse, MessageResponse, RefreshResponse};
use crate::error::ApiError;
use crate::extractors::Requester;
use crate::middleware::auth::bearer_token;
use crate::state::AppState;

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), ApiError> {
    let Json(req) = payload.map_err(|e| AppError::validation(e.body_text()))?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outcome = state.sessions.login(&req.username, &req.password).await?;

    let jar = state.refresh_cookie.set(jar, &outcome.refresh_token)?;
    Ok((
        jar,
        Json(ApiResponse::ok(LoginResponse {
            access_token: outcome.access_token,
            expires_in: state.sessions.issuer().access_ttl_seconds(),
            user: outcome.user.into(),
        })),
    ))
}

/// POST /api/v1/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    requester: Requester,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), ApiError> {
    let presented = state.refresh_cookie.read(&jar);
    state
        .sessions
        .logout(requester.id, presented.as_deref())
        .await?;

    Ok((
        state.refresh_cookie.clear(jar),
        Json(ApiResponse::ok(MessageResponse {
            message: "Logged out".to_string(),
        })),
    ))
}

/// POST /api/v1/auth/refresh
///
/// Not behind the authenticator: the access token is usually expired here.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<RefreshResponse>>), ApiError> {
    let presented = state.refresh_cookie.read(&jar);
    let bearer = bearer_token(&headers)?;

    let outcome = state
        .sessions
        .refresh(presented.as_deref(), bearer)
        .await?;

    let jar = match &outcome.rotated {
        Some(rotated) => state.refresh_cookie.set(jar, rotated)?,
        None => jar,
    };
    Ok((
        jar,
        Json(ApiResponse::ok(RefreshResponse {
            access_token: outcome.access_token,
            expires_in: state.sessions.issuer().access_ttl_seconds(),
        })),
    ))
}
