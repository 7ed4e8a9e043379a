//! Convenience result type alias for bankauth.

use crate::error::AppError;

/// A specialized `Result` type for bankauth operations.
pub type AppResult<T> = Result<T, AppError>;
