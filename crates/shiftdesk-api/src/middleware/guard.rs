//! Authorization guard: minimum authorization level per route group.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{error, warn};

use shiftdesk_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::Requester;

/// Rejects callers whose level is below `minimum` with `Forbidden`.
///
/// Must be layered inside [`authenticate`](super::auth::authenticate):
/// a missing requester is a routing bug and yields an internal error.
///
/// ```ignore
/// router.route_layer(middleware::from_fn(|req: Request, next: Next| {
///     require_level(ROOT_LEVEL, req, next)
/// }))
/// ```
pub async fn require_level(minimum: i32, request: Request, next: Next) -> Result<Response, ApiError> {
    let Some(requester) = request.extensions().get::<Requester>().copied() else {
        error!(
            path = %request.uri().path(),
            "Authorization guard ran before the request authenticator"
        );
        return Err(AppError::internal("Authorization guard without authenticated requester").into());
    };

    if let Err(e) = requester.ensure_level(minimum) {
        warn!(
            user_id = %requester.id,
            level = requester.level,
            required = minimum,
            path = %request.uri().path(),
            "Insufficient authorization level"
        );
        return Err(e.into());
    }

    Ok(next.run(request).await)
}
