//! Axum middleware stack.

pub mod auth;
pub mod cors;
pub mod guard;
pub mod logging;
