//! Access token issuance, verification, and claims.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::AccessClaims;
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;

use chrono::{DateTime, Utc};

use shiftdesk_core::config::AuthConfig;
use shiftdesk_core::result::AppResult;
use shiftdesk_entity::user::UserRole;

/// Mints and verifies access tokens with one server-wide secret.
///
/// Construct once at startup and share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
}

impl TokenIssuer {
    /// Build an issuer from auth configuration. Fails on an empty secret.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        Ok(Self {
            encoder: JwtEncoder::new(config)?,
            decoder: JwtDecoder::new(config)?,
        })
    }

    /// Sign a fresh access token for the identity.
    pub fn issue_access_token(&self, user_id: i64, role: UserRole, level: i32) -> AppResult<String> {
        self.encoder.encode_access_token(user_id, role, level, Utc::now())
    }

    /// Sign an access token as if issued at `issued_at`.
    pub fn issue_access_token_at(
        &self,
        user_id: i64,
        role: UserRole,
        level: i32,
        issued_at: DateTime<Utc>,
    ) -> AppResult<String> {
        self.encoder.encode_access_token(user_id, role, level, issued_at)
    }

    /// Verify signature and expiry of an access token.
    pub fn parse_access_token(&self, token: &str) -> AppResult<AccessClaims> {
        self.decoder.decode_access_token(token)
    }

    /// Verify the signature only; an expired token is still accepted.
    ///
    /// Used on refresh, where the expired access token names the caller.
    pub fn parse_allowing_expired(&self, token: &str) -> AppResult<AccessClaims> {
        self.decoder.decode_allowing_expired(token)
    }

    /// Access token lifetime in seconds.
    pub fn access_ttl_seconds(&self) -> i64 {
        self.encoder.access_ttl_seconds()
    }
}
