//! Access token verification.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use shiftdesk_core::config::AuthConfig;
use shiftdesk_core::error::AppError;

use super::claims::AccessClaims;

/// Verifies access tokens and separates expiry from forgery.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
    /// Same as `validation` but without the expiry check.
    signature_only: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        if config.jwt_secret.is_empty() {
            return Err(AppError::configuration("JWT signing secret is empty"));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        let mut signature_only = validation.clone();
        signature_only.validate_exp = false;

        Ok(Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            signature_only,
        })
    }

    /// Decodes an access token, checking signature, algorithm, and expiry.
    pub fn decode_access_token(&self, token: &str) -> Result<AccessClaims, AppError> {
        let claims = self.decode_with(token, &self.validation)?;
        // The library accepts `exp == now`; the token is dead from that second on.
        if claims.is_expired_at(Utc::now()) {
            return Err(AppError::token_expired());
        }
        claims.user_id()?;
        Ok(claims)
    }

    /// Decodes an access token, checking signature and algorithm only.
    pub fn decode_allowing_expired(&self, token: &str) -> Result<AccessClaims, AppError> {
        let claims = self.decode_with(token, &self.signature_only)?;
        claims.user_id()?;
        Ok(claims)
    }

    fn decode_with(&self, token: &str, validation: &Validation) -> Result<AccessClaims, AppError> {
        decode::<AccessClaims>(token, &self.decoding_key, validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => AppError::token_expired(),
                JwtErrorKind::InvalidSignature => {
                    AppError::invalid_token("Invalid token signature")
                }
                JwtErrorKind::InvalidAlgorithm => {
                    AppError::invalid_token("Unexpected token algorithm")
                }
                _ => AppError::invalid_token("Invalid access token"),
            })
    }
}
