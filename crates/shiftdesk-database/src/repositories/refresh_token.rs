//! Refresh-token repository implementation.
//!
//! Validity is always evaluated by the database clock (`NOW()`), so every
//! replica agrees on when a record expires.

use sqlx::PgPool;

use shiftdesk_core::error::{AppError, ErrorKind};
use shiftdesk_core::result::AppResult;
use shiftdesk_entity::token::{NewRefreshToken, RefreshToken};

use super::user::is_unique_violation;

/// Repository for the `refresh_tokens` table.
#[derive(Debug, Clone)]
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    /// Create a new refresh-token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a record; the server assigns `id` and `issued_at`.
    pub async fn create(&self, data: &NewRefreshToken) -> AppResult<RefreshToken> {
        sqlx::query_as::<_, RefreshToken>(
            "INSERT INTO refresh_tokens (user_id, refresh_token_hash, expires_at) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.refresh_token_hash)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("Refresh token hash already exists")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to insert refresh token", e)
            }
        })
    }

    /// Whether a non-revoked, unexpired record with this hash belongs to the user.
    pub async fn is_valid(&self, user_id: i64, hash: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM refresh_tokens \
             WHERE user_id = $1 AND refresh_token_hash = $2 \
             AND revoked = FALSE AND expires_at > NOW())",
        )
        .bind(user_id)
        .bind(hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check refresh token", e)
        })
    }

    /// Revoke one valid record. Returns `false` if nothing was revoked.
    ///
    /// The `revoked = FALSE` predicate makes concurrent revocations of the
    /// same record single-winner.
    pub async fn revoke(&self, user_id: i64, hash: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked = TRUE \
             WHERE user_id = $1 AND refresh_token_hash = $2 \
             AND revoked = FALSE AND expires_at > NOW()",
        )
        .bind(user_id)
        .bind(hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke refresh token", e)
        })?;
        Ok(result.rows_affected() == 1)
    }

    /// Revoke a valid record and insert its replacement in one transaction.
    ///
    /// Returns `None` when the old record was not valid; nothing is written
    /// in that case or when the insert fails.
    pub async fn rotate(
        &self,
        user_id: i64,
        old_hash: &str,
        replacement: &NewRefreshToken,
    ) -> AppResult<Option<RefreshToken>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin rotation", e)
        })?;

        let revoked = sqlx::query(
            "UPDATE refresh_tokens SET revoked = TRUE \
             WHERE user_id = $1 AND refresh_token_hash = $2 \
             AND revoked = FALSE AND expires_at > NOW()",
        )
        .bind(user_id)
        .bind(old_hash)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke refresh token", e)
        })?;
        if revoked.rows_affected() != 1 {
            // Dropping the transaction rolls it back
            return Ok(None);
        }

        let record = sqlx::query_as::<_, RefreshToken>(
            "INSERT INTO refresh_tokens (user_id, refresh_token_hash, expires_at) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(replacement.user_id)
        .bind(&replacement.refresh_token_hash)
        .bind(replacement.expires_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("Refresh token hash already exists")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to insert refresh token", e)
            }
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit rotation", e)
        })?;
        Ok(Some(record))
    }

    /// Revoke every record of a user. Returns the number of newly revoked rows.
    pub async fn revoke_all_for_user(&self, user_id: i64) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked = TRUE WHERE user_id = $1 AND revoked = FALSE",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke user refresh tokens", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Owner of a currently valid record with this hash.
    pub async fn find_owner(&self, hash: &str) -> AppResult<Option<i64>> {
        sqlx::query_scalar::<_, i64>(
            "SELECT user_id FROM refresh_tokens \
             WHERE refresh_token_hash = $1 AND revoked = FALSE AND expires_at > NOW()",
        )
        .bind(hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find refresh token owner", e)
        })
    }

    /// Valid records of a user, newest first.
    pub async fn find_active_by_user(&self, user_id: i64) -> AppResult<Vec<RefreshToken>> {
        sqlx::query_as::<_, RefreshToken>(
            "SELECT * FROM refresh_tokens \
             WHERE user_id = $1 AND revoked = FALSE AND expires_at > NOW() \
             ORDER BY issued_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list refresh tokens", e)
        })
    }

    /// Delete expired or revoked records. Returns the number deleted.
    pub async fn delete_expired_or_revoked(&self) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM refresh_tokens WHERE expires_at < NOW() OR revoked = TRUE",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to delete expired refresh tokens",
                e,
            )
        })?;
        Ok(result.rows_affected())
    }
}
