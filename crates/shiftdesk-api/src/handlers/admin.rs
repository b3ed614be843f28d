//! Administrative session handlers. Routed behind the root-level guard.

use axum::Json;
use axum::extract::{Path, State};

use crate::dto::response::{ApiResponse, RevokeResponse, SessionResponse};
use crate::error::ApiError;
use crate::extractors::Requester;
use crate::state::AppState;

/// GET /api/v1/admin/users/{id}/sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<SessionResponse>>>, ApiError> {
    let sessions = state.sessions.list_sessions(user_id).await?;
    Ok(Json(ApiResponse::ok(
        sessions.into_iter().map(SessionResponse::from).collect(),
    )))
}

/// POST /api/v1/admin/users/{id}/sessions/revoke
pub async fn revoke_sessions(
    State(state): State<AppState>,
    requester: Requester,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiResponse<RevokeResponse>>, ApiError> {
    let revoked = state
        .sessions
        .revoke_all_sessions(user_id, requester.id)
        .await?;
    Ok(Json(ApiResponse::ok(RevokeResponse { revoked })))
}
