//! Refresh-token domain entities.

pub mod refresh;

pub use refresh::{NewRefreshToken, RefreshToken};
