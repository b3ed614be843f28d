//! `Requester` extractor: the identity attached by the request authenticator.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tracing::error;

use shiftdesk_core::error::AppError;
use shiftdesk_entity::user::UserRole;

use crate::error::ApiError;

/// Authenticated caller, resolved from a verified access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    /// User ID from the token subject.
    pub id: i64,
    /// Role claim.
    pub role: UserRole,
    /// Authorization level claim.
    pub level: i32,
}

impl Requester {
    /// Fails with `Forbidden` if the level is below `minimum`.
    pub fn ensure_level(&self, minimum: i32) -> Result<(), AppError> {
        if self.level < minimum {
            return Err(AppError::forbidden("Insufficient authorization level"));
        }
        Ok(())
    }
}

impl<S> FromRequestParts<S> for Requester
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Requester>().copied().ok_or_else(|| {
            // A route read the requester without the authenticate layer in front of it.
            error!(path = %parts.uri.path(), "Requester missing from request extensions");
            ApiError(AppError::internal("Requester missing from request extensions"))
        })
    }
}
