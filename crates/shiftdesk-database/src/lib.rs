//! # shiftdesk-database
//!
//! PostgreSQL connection management, the migration runner, and the
//! repositories backing user lookup and refresh-token persistence.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
