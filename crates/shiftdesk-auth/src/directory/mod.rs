//! Identity lookup for authentication.
//!
//! The session layer only needs to find accounts by name or ID and, at
//! bootstrap, to create one. User management proper lives elsewhere.

pub mod memory;
pub mod postgres;

pub use memory::MemoryUserDirectory;
pub use postgres::PgUserDirectory;

use async_trait::async_trait;

use shiftdesk_core::result::AppResult;
use shiftdesk_entity::user::{CreateUser, User};

/// Source of identities. `Ok(None)` is the not-found outcome.
#[async_trait]
pub trait UserDirectory: Send + Sync + std::fmt::Debug {
    /// Find an account by login name (case-insensitive).
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find an account by ID.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Create an account. A taken username is a conflict.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;
}
