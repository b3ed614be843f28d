//! ShiftDesk Server: authentication and session back office.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use shiftdesk_auth::{
    PasswordHasher, PgRefreshTokenStore, PgUserDirectory, RefreshTokenStore, SessionManager,
    TokenIssuer, UserDirectory, bootstrap_initial_admin,
};
use shiftdesk_core::config::AppConfig;
use shiftdesk_core::error::AppError;
use shiftdesk_database::connection::DatabasePool;
use shiftdesk_database::repositories::{RefreshTokenRepository, UserRepository};
use shiftdesk_worker::TokenSweeper;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    match config.validate() {
        Ok(warnings) => {
            for warning in &warnings {
                tracing::warn!("{warning}");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    }

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("SHIFTDESK_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        environment = %config.environment,
        "Starting ShiftDesk v{}",
        env!("CARGO_PKG_VERSION")
    );

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    shiftdesk_database::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Identity directory + password hashing ────────────
    let directory: Arc<dyn UserDirectory> = Arc::new(PgUserDirectory::new(UserRepository::new(
        db.pool().clone(),
    )));
    let password_hasher = Arc::new(PasswordHasher::new(&config.auth)?);

    // ── Step 3: Initial root account ─────────────────────────────
    bootstrap_initial_admin(directory.as_ref(), &password_hasher, &config.initial_admin).await?;

    // ── Step 4: Session manager ──────────────────────────────────
    tracing::info!("Initializing authentication system...");
    let issuer = Arc::new(TokenIssuer::new(&config.auth)?);
    let store: Arc<dyn RefreshTokenStore> = Arc::new(PgRefreshTokenStore::new(
        RefreshTokenRepository::new(db.pool().clone()),
    ));
    let sessions = Arc::new(SessionManager::new(
        issuer,
        Arc::clone(&store),
        Arc::clone(&directory),
        password_hasher,
        &config.auth,
    )?);

    // ── Step 5: Shutdown channel ─────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Step 6: Refresh-token sweeper ────────────────────────────
    let sweeper_handle = if config.sweeper.enabled {
        Some(TokenSweeper::new(Arc::clone(&store), &config.sweeper).spawn(shutdown_rx))
    } else {
        tracing::info!("Token sweeper disabled");
        None
    };

    // ── Step 7: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let app = shiftdesk_api::build_router(shiftdesk_api::AppState::new(
        Arc::new(config),
        sessions,
    ));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("ShiftDesk server listening on {}", addr);

    // ── Step 8: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 9: Wait for background tasks ────────────────────────
    if let Some(handle) = sweeper_handle {
        if tokio::time::timeout(grace, handle).await.is_err() {
            tracing::warn!("Token sweeper did not stop within the grace period");
        }
    }

    db.close().await;
    tracing::info!("ShiftDesk server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
