//! Request DTOs with validation.

use serde::Deserialize;
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, max = 64, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, max = 256, message = "Password is required"))]
    pub password: String,
}
