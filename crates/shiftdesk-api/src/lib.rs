//! # shiftdesk-api
//!
//! HTTP API layer for ShiftDesk built on Axum.
//!
//! Provides the authentication endpoints, the request authenticator and
//! authorization-level guard, the refresh-token cookie contract, request
//! logging, CORS, and error mapping.

pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
