//! Refresh-token sweeper: purges expired and revoked records on a timer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use shiftdesk_auth::token::RefreshTokenStore;
use shiftdesk_core::config::SweeperConfig;

/// Periodic deletion of unusable refresh-token records.
///
/// Sweeps once immediately, then every `interval`. A failed sweep is logged
/// and retried on the next tick.
#[derive(Debug)]
pub struct TokenSweeper {
    /// Store to purge
    store: Arc<dyn RefreshTokenStore>,
    /// Time between sweeps
    interval: Duration,
}

impl TokenSweeper {
    /// Create a sweeper from configuration
    pub fn new(store: Arc<dyn RefreshTokenStore>, config: &SweeperConfig) -> Self {
        Self::with_interval(store, config.interval())
    }

    /// Create a sweeper with an explicit interval
    pub fn with_interval(store: Arc<dyn RefreshTokenStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Run one sweep, returning the number of deleted records on success
    pub async fn sweep_once(&self) -> Option<u64> {
        match self.store.delete_expired_or_revoked().await {
            Ok(deleted) => {
                tracing::info!(deleted, "Refresh token sweep completed");
                Some(deleted)
            }
            Err(e) => {
                tracing::error!(error = %e, "Refresh token sweep failed, retrying next tick");
                None
            }
        }
    }

    /// Run until the cancel signal is received or its sender is dropped
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        tracing::info!(
            "Token sweeper started with interval={}s",
            self.interval.as_secs()
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        if !*cancel.borrow() {
            loop {
                tokio::select! {
                    biased;
                    changed = cancel.changed() => {
                        if changed.is_err() || *cancel.borrow() {
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        self.sweep_once().await;
                    }
                }
            }
        }

        tracing::info!("Token sweeper stopped");
    }

    /// Spawn the sweeper onto the runtime
    pub fn spawn(self, cancel: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(cancel).await })
    }
}
