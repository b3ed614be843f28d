//! Session lifecycle manager: login, logout, and refresh flows.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use shiftdesk_core::config::{AuthConfig, LogoutScope};
use shiftdesk_core::error::AppError;
use shiftdesk_core::result::AppResult;
use shiftdesk_entity::token::RefreshToken;
use shiftdesk_entity::user::{User, UserRole};

use crate::directory::UserDirectory;
use crate::jwt::TokenIssuer;
use crate::password::PasswordVerifier;
use crate::token::{IssuedRefreshToken, RefreshTokenStore, generate_secret, hash_secret};

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Signed access token for the response body.
    pub access_token: String,
    /// Refresh token for the HttpOnly cookie.
    pub refresh_token: IssuedRefreshToken,
    /// The authenticated account.
    pub user: User,
}

/// Result of a successful refresh.
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    /// Newly signed access token.
    pub access_token: String,
    /// Replacement refresh token when rotation is enabled.
    pub rotated: Option<IssuedRefreshToken>,
}

/// Orchestrates credential checks, token issuance, and revocation.
#[derive(Clone)]
pub struct SessionManager {
    issuer: Arc<TokenIssuer>,
    store: Arc<dyn RefreshTokenStore>,
    directory: Arc<dyn UserDirectory>,
    verifier: Arc<dyn PasswordVerifier>,
    refresh_ttl: Duration,
    rotate_refresh_tokens: bool,
    logout_scope: LogoutScope,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("refresh_ttl", &self.refresh_ttl)
            .field("rotate_refresh_tokens", &self.rotate_refresh_tokens)
            .field("logout_scope", &self.logout_scope)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        issuer: Arc<TokenIssuer>,
        store: Arc<dyn RefreshTokenStore>,
        directory: Arc<dyn UserDirectory>,
        verifier: Arc<dyn PasswordVerifier>,
        config: &AuthConfig,
    ) -> AppResult<Self> {
        let refresh_ttl = Duration::try_days(config.refresh_token_ttl_days)
            .ok_or_else(|| AppError::configuration("Refresh token lifetime is out of range"))?;
        Ok(Self {
            issuer,
            store,
            directory,
            verifier,
            refresh_ttl,
            rotate_refresh_tokens: config.rotate_refresh_tokens,
            logout_scope: config.logout_scope,
        })
    }

    /// The token issuer shared with the request authenticator.
    pub fn issuer(&self) -> &Arc<TokenIssuer> {
        &self.issuer
    }

    /// The identity directory.
    pub fn directory(&self) -> &Arc<dyn UserDirectory> {
        &self.directory
    }

    /// Performs the login flow:
    ///
    /// 1. Find the account
    /// 2. Verify the password
    /// 3. Sign an access token
    /// 4. Generate and persist a refresh token
    ///
    /// Unknown usernames and wrong passwords fail identically.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginOutcome> {
        // Step 1: Find user
        let Some(user) = self.directory.find_by_username(username).await? else {
            info!(username = %username, "Login rejected: unknown username");
            return Err(AppError::invalid_credentials());
        };

        // Step 2: Verify password
        if !self.verifier.verify(&user.password_hash, password)? {
            info!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AppError::invalid_credentials());
        }

        // Step 3: Access token
        let access_token = self
            .issuer
            .issue_access_token(user.id, user.role, user.level())?;

        // Step 4: Refresh token
        let refresh_token = self.issue_refresh_token(user.id).await?;

        info!(user_id = %user.id, role = %user.role, "Login successful");

        Ok(LoginOutcome {
            access_token,
            refresh_token,
            user,
        })
    }

    /// Revokes refresh tokens of an authenticated identity.
    ///
    /// With [`LogoutScope::All`] every token of the identity is revoked.
    /// With [`LogoutScope::Session`] only the presented token is revoked,
    /// falling back to all tokens when none is presented.
    pub async fn logout(&self, user_id: i64, presented: Option<&str>) -> AppResult<u64> {
        let revoked = match (self.logout_scope, presented) {
            (LogoutScope::Session, Some(raw)) => {
                u64::from(self.store.revoke(user_id, &hash_secret(raw)).await?)
            }
            _ => self.store.revoke_all(user_id).await?,
        };

        info!(
            user_id = %user_id,
            scope = %self.logout_scope,
            revoked,
            "Logout completed"
        );
        Ok(revoked)
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// The caller is named by the bearer token when one is presented (its
    /// signature must verify; expiry is tolerated). Otherwise the owner of
    /// the refresh record is loaded from the directory.
    pub async fn refresh(
        &self,
        presented: Option<&str>,
        bearer: Option<&str>,
    ) -> AppResult<RefreshOutcome> {
        // Step 1: Require the cookie
        let raw = presented
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| AppError::unauthenticated("Refresh token cookie is missing"))?;
        let digest = hash_secret(raw);

        // Step 2: Resolve the caller
        let (user_id, role, level) = match bearer {
            Some(token) => {
                let claims = self.issuer.parse_allowing_expired(token)?;
                (claims.user_id()?, claims.role, claims.level)
            }
            None => self.resolve_owner(&digest).await?,
        };

        // Step 3: Validate, swapping the presented token when rotating
        let rotated = if self.rotate_refresh_tokens {
            let secret = generate_secret();
            let expires_at = Utc::now() + self.refresh_ttl;
            let swapped = self
                .store
                .rotate(user_id, &digest, &hash_secret(&secret), expires_at)
                .await?;
            if swapped.is_none() {
                warn!(user_id = %user_id, "Refresh rejected: token invalid or already used");
                return Err(AppError::invalid_refresh_token());
            }
            Some(IssuedRefreshToken { secret, expires_at })
        } else {
            if !self.store.is_valid(user_id, &digest).await? {
                warn!(user_id = %user_id, "Refresh rejected: token invalid");
                return Err(AppError::invalid_refresh_token());
            }
            None
        };

        // Step 4: New access token with the same claims
        let access_token = self.issuer.issue_access_token(user_id, role, level)?;

        debug!(user_id = %user_id, rotated = rotated.is_some(), "Access token refreshed");

        Ok(RefreshOutcome {
            access_token,
            rotated,
        })
    }

    /// Loads the profile of an authenticated identity.
    pub async fn profile(&self, user_id: i64) -> AppResult<User> {
        self.directory
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    /// Valid refresh-token records of an identity, newest first.
    pub async fn list_sessions(&self, user_id: i64) -> AppResult<Vec<RefreshToken>> {
        self.profile(user_id).await?;
        self.store.list_active(user_id).await
    }

    /// Forced logout of every session of an identity.
    pub async fn revoke_all_sessions(&self, user_id: i64, by: i64) -> AppResult<u64> {
        self.profile(user_id).await?;
        let revoked = self.store.revoke_all(user_id).await?;
        warn!(
            user_id = %user_id,
            revoked_by = %by,
            revoked,
            "All sessions revoked by administrator"
        );
        Ok(revoked)
    }

    async fn resolve_owner(&self, digest: &str) -> AppResult<(i64, UserRole, i32)> {
        let owner = self
            .store
            .find_owner(digest)
            .await?
            .ok_or_else(AppError::invalid_refresh_token)?;
        let user = self
            .directory
            .find_by_id(owner)
            .await?
            .ok_or_else(AppError::invalid_refresh_token)?;
        Ok((user.id, user.role, user.level()))
    }

    async fn issue_refresh_token(&self, user_id: i64) -> AppResult<IssuedRefreshToken> {
        let secret = generate_secret();
        let expires_at = Utc::now() + self.refresh_ttl;
        self.store
            .insert(user_id, &hash_secret(&secret), expires_at)
            .await?;
        Ok(IssuedRefreshToken { secret, expires_at })
    }
}
