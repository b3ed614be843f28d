//! Unified application error types for ShiftDesk.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The HTTP layer turns an `AppError`
//! into a response using [`ErrorKind::client_code`] and
//! [`ErrorKind::status_code`].

use std::fmt;
use thiserror::Error;

/// Message shown to clients for every server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Message shared by the unknown-username and wrong-password login outcomes.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Input validation failed.
    Validation,
    /// Unknown username or wrong password.
    InvalidCredentials,
    /// No session, or the caller could not be identified.
    Unauthenticated,
    /// Access token signature is valid but it has expired.
    TokenExpired,
    /// Access token is malformed, forged, or signed with another algorithm.
    InvalidToken,
    /// Refresh token is unknown, revoked, or expired.
    InvalidRefreshToken,
    /// Authenticated, but the authorization level is too low.
    Forbidden,
    /// The requested resource was not found.
    NotFound,
    /// A uniqueness or state conflict occurred.
    Conflict,
    /// An internal server error occurred.
    Internal,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
}

impl ErrorKind {
    /// Stable numeric code carried in client-facing error bodies.
    pub fn client_code(&self) -> u32 {
        match self {
            Self::Validation => 40000,
            Self::InvalidCredentials => 40100,
            Self::Unauthenticated => 40101,
            Self::TokenExpired => 40102,
            Self::InvalidToken => 40103,
            Self::InvalidRefreshToken => 40104,
            Self::Forbidden => 40300,
            Self::NotFound => 40400,
            Self::Conflict => 40900,
            Self::Internal | Self::Database | Self::Configuration => 50000,
        }
    }

    /// HTTP status code for this kind.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::InvalidCredentials
            | Self::Unauthenticated
            | Self::TokenExpired
            | Self::InvalidToken
            | Self::InvalidRefreshToken => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Internal | Self::Database | Self::Configuration => 500,
        }
    }

    /// Whether the failure originates on the server side.
    ///
    /// Messages of server-side errors must never reach the client.
    pub fn is_server_side(&self) -> bool {
        matches!(self, Self::Internal | Self::Database | Self::Configuration)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION_ERROR"),
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::Unauthenticated => write!(f, "UNAUTHENTICATED"),
            Self::TokenExpired => write!(f, "TOKEN_EXPIRED"),
            Self::InvalidToken => write!(f, "INVALID_TOKEN"),
            Self::InvalidRefreshToken => write!(f, "INVALID_REFRESH_TOKEN"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
        }
    }
}

/// The unified application error used throughout ShiftDesk.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create the uniform invalid-login error.
    ///
    /// The message never varies, so unknown usernames and wrong passwords
    /// are indistinguishable to the client.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, INVALID_CREDENTIALS_MESSAGE)
    }

    /// Create an unauthenticated error.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message)
    }

    /// Create an expired-access-token error.
    pub fn token_expired() -> Self {
        Self::new(ErrorKind::TokenExpired, "Access token has expired")
    }

    /// Create an invalid-access-token error.
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidToken, message)
    }

    /// Create an invalid-refresh-token error.
    pub fn invalid_refresh_token() -> Self {
        Self::new(
            ErrorKind::InvalidRefreshToken,
            "Refresh token is invalid, revoked, or expired",
        )
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Message that may be shown to the client.
    pub fn client_message(&self) -> &str {
        if self.kind.is_server_side() {
            INTERNAL_ERROR_MESSAGE
        } else {
            &self.message
        }
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Internal,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
