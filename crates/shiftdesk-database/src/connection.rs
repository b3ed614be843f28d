//! PostgreSQL pool setup.

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use shiftdesk_core::config::DatabaseConfig;
use shiftdesk_core::error::{AppError, ErrorKind};

/// Shared pool behind every repository.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open the pool and wait for the first connection.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let target = mask_password(&config.url);
        info!(url = %target, max_connections = config.max_connections, "Opening PostgreSQL pool");

        let pool = pool_options(config)
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Cannot reach PostgreSQL at {target}"),
                    e,
                )
            })?;
        Ok(Self { pool })
    }

    /// The sqlx pool handed to repositories and migrations.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Wait for checked-out connections to return, then close them.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("PostgreSQL pool closed");
    }
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
}

/// Replace the password of a connection URL with `****`.
pub fn mask_password(url: &str) -> String {
    let (scheme, rest) = match url.split_once("://") {
        Some((scheme, rest)) => (format!("{scheme}://"), rest),
        None => (String::new(), url),
    };
    // The host follows the last '@'; the password may itself contain '@'
    let Some((userinfo, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    match userinfo.split_once(':') {
        Some((user, _)) => format!("{scheme}{user}:****@{host}"),
        None => url.to_string(),
    }
}
