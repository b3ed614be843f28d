//! Session lifecycle: login, logout, refresh, and account bootstrap.

pub mod bootstrap;
pub mod manager;

pub use bootstrap::bootstrap_initial_admin;
pub use manager::{LoginOutcome, RefreshOutcome, SessionManager};
