//! Refresh-token secrets.
//!
//! The raw secret is 256 bits from the OS-seeded thread RNG, encoded as
//! unpadded URL-safe base64 so it fits a cookie value verbatim. Only its
//! SHA-256 hex digest is ever persisted.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Number of random bytes in a refresh-token secret.
pub const SECRET_BYTES: usize = 32;

/// Generate a fresh raw refresh-token secret.
pub fn generate_secret() -> String {
    let bytes: [u8; SECRET_BYTES] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// SHA-256 hex digest of a raw secret, used for storage and lookup.
pub fn hash_secret(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}

/// A refresh token handed to the client exactly once.
#[derive(Clone)]
pub struct IssuedRefreshToken {
    /// Raw secret for the cookie value.
    pub secret: String,
    /// Expiry, mirrored by the cookie.
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for IssuedRefreshToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedRefreshToken")
            .field("secret", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
