//! Convenience result type alias for Stockroom.

use crate::error::AppError;

/// A specialized `Result` type for Stockroom operations.
pub type AppResult<T> = Result<T, AppError>;
