//! Authentication configuration.

use serde::{Deserialize, Serialize};

use super::Environment;
use crate::error::AppError;

/// Placeholder secret shipped in `config/default.toml`.
///
/// Accepted in development, rejected in production.
pub const PLACEHOLDER_JWT_SECRET: &str = "change-me-in-production";

/// Secrets shorter than this many bytes are accepted with a warning.
pub const RECOMMENDED_SECRET_LEN: usize = 32;

/// Longest accepted access token lifetime: one day.
pub const MAX_ACCESS_TOKEN_TTL_MINUTES: i64 = 24 * 60;

/// Longest accepted refresh token lifetime: one year.
pub const MAX_REFRESH_TOKEN_TTL_DAYS: i64 = 365;

/// Which refresh tokens a logout revokes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoutScope {
    /// Every refresh token of the identity (all devices).
    #[default]
    All,
    /// Only the refresh token presented in the cookie.
    Session,
}

impl std::fmt::Display for LogoutScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Session => write!(f, "session"),
        }
    }
}

/// Authentication and session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Symmetric HMAC secret for signing access tokens.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token lifetime in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_minutes: i64,
    /// Refresh token lifetime in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_days: i64,
    /// Name of the HttpOnly cookie carrying the refresh token.
    #[serde(default = "default_cookie_name")]
    pub refresh_cookie_name: String,
    /// Issue a new refresh token (and revoke the old one) on every refresh.
    #[serde(default = "default_true")]
    pub rotate_refresh_tokens: bool,
    /// Which refresh tokens a logout revokes.
    #[serde(default)]
    pub logout_scope: LogoutScope,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_hash_memory")]
    pub password_hash_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_hash_iterations")]
    pub password_hash_iterations: u32,
    /// Argon2 lane count.
    #[serde(default = "default_hash_parallelism")]
    pub password_hash_parallelism: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            access_token_ttl_minutes: default_access_ttl(),
            refresh_token_ttl_days: default_refresh_ttl(),
            refresh_cookie_name: default_cookie_name(),
            rotate_refresh_tokens: true,
            logout_scope: LogoutScope::default(),
            password_hash_memory_kib: default_hash_memory(),
            password_hash_iterations: default_hash_iterations(),
            password_hash_parallelism: default_hash_parallelism(),
        }
    }
}

impl AuthConfig {
    /// Validate the signing secret and lifetimes for the given environment.
    ///
    /// Returns warnings for settings that are accepted but weak. The caller
    /// logs them once a subscriber is installed.
    pub fn validate(&self, environment: Environment) -> Result<Vec<String>, AppError> {
        let mut warnings = Vec::new();
        if self.jwt_secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if environment.is_production() && self.jwt_secret == PLACEHOLDER_JWT_SECRET {
            return Err(AppError::configuration(
                "auth.jwt_secret still holds the placeholder value; set SHIFTDESK__AUTH__JWT_SECRET",
            ));
        }
        if self.jwt_secret.len() < RECOMMENDED_SECRET_LEN {
            warnings.push(format!(
                "JWT secret is {} bytes, shorter than the recommended {RECOMMENDED_SECRET_LEN}",
                self.jwt_secret.len()
            ));
        }
        if !(1..=MAX_ACCESS_TOKEN_TTL_MINUTES).contains(&self.access_token_ttl_minutes) {
            return Err(AppError::configuration(format!(
                "auth.access_token_ttl_minutes must be between 1 and {MAX_ACCESS_TOKEN_TTL_MINUTES}"
            )));
        }
        if !(1..=MAX_REFRESH_TOKEN_TTL_DAYS).contains(&self.refresh_token_ttl_days) {
            return Err(AppError::configuration(format!(
                "auth.refresh_token_ttl_days must be between 1 and {MAX_REFRESH_TOKEN_TTL_DAYS}"
            )));
        }
        if self.refresh_cookie_name.is_empty() {
            return Err(AppError::configuration(
                "auth.refresh_cookie_name must not be empty",
            ));
        }
        Ok(warnings)
    }
}

/// Root account ensured at startup.
#[derive(Clone, Serialize, Deserialize)]
pub struct InitialAdminConfig {
    /// Whether the bootstrap step runs.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Login name.
    #[serde(default = "default_admin_username")]
    pub username: String,
    /// Initial plaintext password. Change it after first login.
    #[serde(default = "default_admin_password")]
    pub password: String,
    /// Contact email.
    #[serde(default = "default_admin_email")]
    pub email: String,
    /// Display name.
    #[serde(default = "default_admin_full_name")]
    pub full_name: String,
}

impl Default for InitialAdminConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            username: default_admin_username(),
            password: default_admin_password(),
            email: default_admin_email(),
            full_name: default_admin_full_name(),
        }
    }
}

impl std::fmt::Debug for InitialAdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitialAdminConfig")
            .field("enabled", &self.enabled)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .finish()
    }
}

fn default_jwt_secret() -> String {
    PLACEHOLDER_JWT_SECRET.to_string()
}

fn default_access_ttl() -> i64 {
    15
}

fn default_refresh_ttl() -> i64 {
    14
}

fn default_cookie_name() -> String {
    "__session_refresh_token".to_string()
}

fn default_true() -> bool {
    true
}

fn default_hash_memory() -> u32 {
    19456
}

fn default_hash_iterations() -> u32 {
    2
}

fn default_hash_parallelism() -> u32 {
    1
}

fn default_admin_username() -> String {
    "root".to_string()
}

fn default_admin_password() -> String {
    "change-me-now".to_string()
}

fn default_admin_email() -> String {
    "root@localhost".to_string()
}

fn default_admin_full_name() -> String {
    "Administrator".to_string()
}
