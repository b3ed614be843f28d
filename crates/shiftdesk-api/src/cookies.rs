//! Refresh-token cookie contract.
//!
//! The cookie is `HttpOnly` with `Path=/` and expires with the token.
//! In production it is also `Secure` and `SameSite=Strict`.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::OffsetDateTime;

use shiftdesk_auth::IssuedRefreshToken;
use shiftdesk_core::config::Environment;
use shiftdesk_core::error::AppError;

/// Cookie policy for the refresh token.
#[derive(Debug, Clone)]
pub struct RefreshCookie {
    name: String,
    production: bool,
}

impl RefreshCookie {
    /// Policy for the given cookie name and environment.
    pub fn new(name: &str, environment: Environment) -> Self {
        Self {
            name: name.to_string(),
            production: environment.is_production(),
        }
    }

    /// Raw refresh token presented by the client, if any.
    pub fn read(&self, jar: &CookieJar) -> Option<String> {
        jar.get(&self.name)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Add the cookie carrying a freshly issued refresh token.
    pub fn set(&self, jar: CookieJar, token: &IssuedRefreshToken) -> Result<CookieJar, AppError> {
        let expires = OffsetDateTime::from_unix_timestamp(token.expires_at.timestamp())
            .map_err(|e| AppError::internal(format!("Refresh token expiry out of range: {e}")))?;
        Ok(jar.add(self.build(token.secret.clone(), expires)))
    }

    /// Overwrite the cookie with an empty, already-expired value.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.add(self.build(String::new(), OffsetDateTime::UNIX_EPOCH))
    }

    fn build(&self, value: String, expires: OffsetDateTime) -> Cookie<'static> {
        let builder = Cookie::build((self.name.clone(), value))
            .http_only(true)
            .path("/")
            .expires(expires);
        let builder = if self.production {
            builder.secure(true).same_site(SameSite::Strict)
        } else {
            builder
        };
        builder.build()
    }
}
