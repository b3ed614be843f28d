//! Claims carried by every access token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shiftdesk_core::error::AppError;
use shiftdesk_core::result::AppResult;
use shiftdesk_entity::user::UserRole;

/// JWT claims payload of an access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject: the numeric user ID rendered as a string.
    pub sub: String,
    /// Role at the time of issuance.
    pub role: UserRole,
    /// Authorization level at the time of issuance.
    pub level: i32,
    /// Issued-at timestamp in whole seconds since epoch.
    ///
    /// Two tokens signed within the same second share this value; only
    /// issuances at least one second apart are ordered by it.
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl AccessClaims {
    /// Parse the subject back into a user ID.
    pub fn user_id(&self) -> AppResult<i64> {
        self.sub
            .parse::<i64>()
            .map_err(|_| AppError::invalid_token("Token subject is not a user id"))
    }

    /// Whether the token is expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}
