//! Convenience result type alias for Hourbook.

use crate::error::AppError;

/// A specialized `Result` type for Hourbook operations.
///
/// Every crate returns this instead of spelling out `Result<T, AppError>`.
pub type AppResult<T> = Result<T, AppError>;
