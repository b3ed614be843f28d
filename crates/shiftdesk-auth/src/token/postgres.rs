//! PostgreSQL-backed refresh-token store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use shiftdesk_core::result::AppResult;
use shiftdesk_database::repositories::RefreshTokenRepository;
use shiftdesk_entity::token::{NewRefreshToken, RefreshToken};

use super::store::RefreshTokenStore;

/// Refresh-token store over the `refresh_tokens` table.
#[derive(Debug, Clone)]
pub struct PgRefreshTokenStore {
    repo: RefreshTokenRepository,
}

impl PgRefreshTokenStore {
    /// Wrap a repository.
    pub fn new(repo: RefreshTokenRepository) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl RefreshTokenStore for PgRefreshTokenStore {
    async fn insert(
        &self,
        user_id: i64,
        digest: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<RefreshToken> {
        self.repo
            .create(&NewRefreshToken {
                user_id,
                refresh_token_hash: digest.to_string(),
                expires_at,
            })
            .await
    }

    async fn is_valid(&self, user_id: i64, digest: &str) -> AppResult<bool> {
        self.repo.is_valid(user_id, digest).await
    }

    async fn revoke(&self, user_id: i64, digest: &str) -> AppResult<bool> {
        self.repo.revoke(user_id, digest).await
    }

    async fn rotate(
        &self,
        user_id: i64,
        old_digest: &str,
        new_digest: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<Option<RefreshToken>> {
        self.repo
            .rotate(
                user_id,
                old_digest,
                &NewRefreshToken {
                    user_id,
                    refresh_token_hash: new_digest.to_string(),
                    expires_at,
                },
            )
            .await
    }

    async fn revoke_all(&self, user_id: i64) -> AppResult<u64> {
        self.repo.revoke_all_for_user(user_id).await
    }

    async fn find_owner(&self, digest: &str) -> AppResult<Option<i64>> {
        self.repo.find_owner(digest).await
    }

    async fn list_active(&self, user_id: i64) -> AppResult<Vec<RefreshToken>> {
        self.repo.find_active_by_user(user_id).await
    }

    async fn delete_expired_or_revoked(&self) -> AppResult<u64> {
        self.repo.delete_expired_or_revoked().await
    }
}
