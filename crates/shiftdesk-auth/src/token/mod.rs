//! Opaque refresh tokens: secret generation, hashing, and storage.

pub mod memory;
pub mod postgres;
pub mod secret;
pub mod store;

pub use memory::MemoryRefreshTokenStore;
pub use postgres::PgRefreshTokenStore;
pub use secret::{IssuedRefreshToken, generate_secret, hash_secret};
pub use store::RefreshTokenStore;
