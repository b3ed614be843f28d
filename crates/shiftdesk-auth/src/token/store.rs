//! Refresh-token store abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use shiftdesk_core::result::AppResult;
use shiftdesk_entity::token::RefreshToken;

/// Persistence of refresh-token records, keyed by the secret's digest.
///
/// A record is valid iff it is not revoked and `expires_at > now`.
/// Implementations surface storage failures as server-side errors.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync + std::fmt::Debug {
    /// Persist a new record; the store assigns `id` and `issued_at`.
    async fn insert(
        &self,
        user_id: i64,
        digest: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<RefreshToken>;

    /// Whether a valid record with this digest belongs to `user_id`.
    async fn is_valid(&self, user_id: i64, digest: &str) -> AppResult<bool>;

    /// Revoke one valid record. At most one concurrent caller gets `true`.
    async fn revoke(&self, user_id: i64, digest: &str) -> AppResult<bool>;

    /// Revoke `old_digest` and insert `new_digest` as one atomic step.
    ///
    /// Returns `None` and changes nothing when the old record is not valid
    /// for `user_id`. On error the old record stays valid.
    async fn rotate(
        &self,
        user_id: i64,
        old_digest: &str,
        new_digest: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<Option<RefreshToken>>;

    /// Revoke every record of `user_id`, returning how many were newly revoked.
    async fn revoke_all(&self, user_id: i64) -> AppResult<u64>;

    /// Owner of the valid record with this digest.
    async fn find_owner(&self, digest: &str) -> AppResult<Option<i64>>;

    /// Valid records of `user_id`, newest first.
    async fn list_active(&self, user_id: i64) -> AppResult<Vec<RefreshToken>>;

    /// Delete every expired or revoked record, returning the count.
    async fn delete_expired_or_revoked(&self) -> AppResult<u64>;
}
