//! Convenience result type alias for PushGate.

use crate::error::AppError;

/// A specialized `Result` type for PushGate operations.
pub type AppResult<T> = Result<T, AppError>;
