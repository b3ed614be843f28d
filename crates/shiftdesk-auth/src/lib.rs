//! # shiftdesk-auth
//!
//! Authentication and session lifecycle for the ShiftDesk back office.
//!
//! ## Modules
//!
//! - `jwt`: access token issuance and verification (HS256)
//! - `token`: refresh-token secrets, hashing, and the revocable store
//! - `directory`: identity lookup over the user table
//! - `password`: Argon2id hashing and verification
//! - `session`: login, logout, and refresh orchestration

pub mod directory;
pub mod jwt;
pub mod password;
pub mod session;
pub mod token;

pub use directory::{MemoryUserDirectory, PgUserDirectory, UserDirectory};
pub use jwt::{AccessClaims, TokenIssuer};
pub use password::{PasswordHasher, PasswordVerifier};
pub use session::{LoginOutcome, RefreshOutcome, SessionManager, bootstrap_initial_admin};
pub use token::{IssuedRefreshToken, MemoryRefreshTokenStore, PgRefreshTokenStore, RefreshTokenStore};
