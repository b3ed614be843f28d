//! Self-service handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::Requester;
use crate::state::AppState;

/// GET /api/v1/me
pub async fn me(
    State(state): State<AppState>,
    requester: Requester,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.sessions.profile(requester.id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}
