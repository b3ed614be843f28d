//! Refresh-token sweeper configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Longest accepted sweep interval: one year.
pub const MAX_SWEEP_INTERVAL_HOURS: u64 = 24 * 365;

/// Background sweeper that purges expired and revoked refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweeperConfig {
    /// Whether the sweeper runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Hours between sweeps. One sweep always runs at startup.
    #[serde(default = "default_interval_hours")]
    pub interval_hours: u64,
}

impl SweeperConfig {
    /// Time between sweeps, capped at [`MAX_SWEEP_INTERVAL_HOURS`].
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_hours.min(MAX_SWEEP_INTERVAL_HOURS) * 3600)
    }

    /// Reject intervals of zero or beyond the cap.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.interval_hours == 0 {
            return Err(AppError::configuration(
                "Sweeper interval must be at least one hour",
            ));
        }
        if self.interval_hours > MAX_SWEEP_INTERVAL_HOURS {
            return Err(AppError::configuration(format!(
                "Sweeper interval must not exceed {MAX_SWEEP_INTERVAL_HOURS} hours"
            )));
        }
        Ok(())
    }
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_hours: default_interval_hours(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_interval_hours() -> u64 {
    24
}
