//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use shiftdesk_auth::{SessionManager, TokenIssuer};
use shiftdesk_core::config::AppConfig;

use crate::cookies::RefreshCookie;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped or cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Login, logout, and refresh orchestration
    pub sessions: Arc<SessionManager>,
    /// Refresh-token cookie policy
    pub refresh_cookie: RefreshCookie,
}

impl AppState {
    /// Assemble the state; the cookie policy follows the configured environment.
    pub fn new(config: Arc<AppConfig>, sessions: Arc<SessionManager>) -> Self {
        let refresh_cookie = RefreshCookie::new(&config.auth.refresh_cookie_name, config.environment);
        Self {
            config,
            sessions,
            refresh_cookie,
        }
    }

    /// The access token issuer.
    pub fn issuer(&self) -> &Arc<TokenIssuer> {
        self.sessions.issuer()
    }
}
