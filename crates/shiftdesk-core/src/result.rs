//! Convenience result type alias for ShiftDesk.

use crate::error::AppError;

/// A specialized `Result` type for ShiftDesk operations.
pub type AppResult<T> = Result<T, AppError>;
