//! In-memory refresh-token store for single-node deployments and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use shiftdesk_core::error::AppError;
use shiftdesk_core::result::AppResult;
use shiftdesk_entity::token::RefreshToken;

use super::store::RefreshTokenStore;

#[derive(Debug, Default)]
struct InnerState {
    /// Last assigned record ID.
    last_id: i64,
    /// Records keyed by digest; the key doubles as the uniqueness constraint.
    by_digest: HashMap<String, RefreshToken>,
}

impl InnerState {
    fn insert(
        &mut self,
        user_id: i64,
        digest: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<RefreshToken> {
        if self.by_digest.contains_key(digest) {
            return Err(AppError::conflict("Refresh token hash already exists"));
        }

        self.last_id += 1;
        let record = RefreshToken {
            id: self.last_id,
            user_id,
            refresh_token_hash: digest.to_string(),
            issued_at: Utc::now(),
            expires_at,
            revoked: false,
        };
        self.by_digest.insert(digest.to_string(), record.clone());
        Ok(record)
    }
}

/// In-memory refresh-token store guarded by a Tokio mutex.
///
/// Records do not survive a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryRefreshTokenStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryRefreshTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held, valid or not.
    pub async fn len(&self) -> usize {
        self.state.lock().await.by_digest.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryRefreshTokenStore {
    async fn insert(
        &self,
        user_id: i64,
        digest: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<RefreshToken> {
        self.state.lock().await.insert(user_id, digest, expires_at)
    }

    async fn is_valid(&self, user_id: i64, digest: &str) -> AppResult<bool> {
        let state = self.state.lock().await;
        let now = Utc::now();
        Ok(state
            .by_digest
            .get(digest)
            .is_some_and(|r| r.user_id == user_id && r.is_valid_at(now)))
    }

    async fn revoke(&self, user_id: i64, digest: &str) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        let now = Utc::now();
        match state.by_digest.get_mut(digest) {
            Some(record) if record.user_id == user_id && record.is_valid_at(now) => {
                record.revoked = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn rotate(
        &self,
        user_id: i64,
        old_digest: &str,
        new_digest: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<Option<RefreshToken>> {
        let mut state = self.state.lock().await;
        let now = Utc::now();
        let old_is_valid = state
            .by_digest
            .get(old_digest)
            .is_some_and(|r| r.user_id == user_id && r.is_valid_at(now));
        if !old_is_valid {
            return Ok(None);
        }

        // A failed insert must leave the old record valid
        let record = state.insert(user_id, new_digest, expires_at)?;
        if let Some(old) = state.by_digest.get_mut(old_digest) {
            old.revoked = true;
        }
        Ok(Some(record))
    }

    async fn revoke_all(&self, user_id: i64) -> AppResult<u64> {
        let mut state = self.state.lock().await;
        let mut revoked = 0;
        for record in state.by_digest.values_mut() {
            if record.user_id == user_id && !record.revoked {
                record.revoked = true;
                revoked += 1;
            }
        }
        Ok(revoked)
    }

    async fn find_owner(&self, digest: &str) -> AppResult<Option<i64>> {
        let state = self.state.lock().await;
        let now = Utc::now();
        Ok(state
            .by_digest
            .get(digest)
            .filter(|r| r.is_valid_at(now))
            .map(|r| r.user_id))
    }

    async fn list_active(&self, user_id: i64) -> AppResult<Vec<RefreshToken>> {
        let state = self.state.lock().await;
        let now = Utc::now();
        let mut active: Vec<RefreshToken> = state
            .by_digest
            .values()
            .filter(|r| r.user_id == user_id && r.is_valid_at(now))
            .cloned()
            .collect();
        active.sort_by(|a, b| b.issued_at.cmp(&a.issued_at).then(b.id.cmp(&a.id)));
        Ok(active)
    }

    async fn delete_expired_or_revoked(&self) -> AppResult<u64> {
        let mut state = self.state.lock().await;
        let now = Utc::now();
        let before = state.by_digest.len();
        state.by_digest.retain(|_, r| !r.is_sweepable_at(now));
        Ok((before - state.by_digest.len()) as u64)
    }
}
