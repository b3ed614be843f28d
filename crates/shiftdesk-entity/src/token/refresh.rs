//! Refresh-token record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted refresh-token record.
///
/// Only the SHA-256 hex digest of the secret is stored; the raw secret
/// leaves the server once, in the login response cookie.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshToken {
    /// Server-assigned identifier.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// SHA-256 hex digest of the raw secret.
    #[serde(skip_serializing)]
    pub refresh_token_hash: String,
    /// When the token was issued.
    pub issued_at: DateTime<Utc>,
    /// When the token stops being usable.
    pub expires_at: DateTime<Utc>,
    /// Set on logout, rotation, or forced revocation.
    pub revoked: bool,
}

impl RefreshToken {
    /// Whether the record can be used at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.revoked && self.expires_at > now
    }

    /// Whether the record can be used right now.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Whether the sweeper may delete the record at `now`.
    pub fn is_sweepable_at(&self, now: DateTime<Utc>) -> bool {
        self.revoked || self.expires_at < now
    }
}

/// Data required to persist a new refresh token.
#[derive(Debug, Clone)]
pub struct NewRefreshToken {
    /// Owning user.
    pub user_id: i64,
    /// SHA-256 hex digest of the raw secret.
    pub refresh_token_hash: String,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(expires_at: DateTime<Utc>, revoked: bool) -> RefreshToken {
        RefreshToken {
            id: 1,
            user_id: 1,
            refresh_token_hash: "ab".repeat(32),
            issued_at: Utc::now(),
            expires_at,
            revoked,
        }
    }

    #[test]
    fn test_validity() {
        let now = Utc::now();
        assert!(record(now + Duration::days(1), false).is_valid_at(now));
        assert!(!record(now + Duration::days(1), true).is_valid_at(now));
        assert!(!record(now - Duration::seconds(1), false).is_valid_at(now));
        assert!(!record(now, false).is_valid_at(now));
    }

    #[test]
    fn test_sweepable_is_never_valid() {
        let now = Utc::now();
        for (offset, revoked) in [(-60, false), (60, true), (-60, true), (60, false)] {
            let token = record(now + Duration::seconds(offset), revoked);
            if token.is_sweepable_at(now) {
                assert!(!token.is_valid_at(now));
            }
        }
    }

    #[test]
    fn test_hash_is_not_serialized() {
        let json = serde_json::to_value(record(Utc::now(), false)).unwrap();
        assert!(json.get("refresh_token_hash").is_none());
    }
}
