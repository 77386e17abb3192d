//! # Form Error Types

use thiserror::Error;

/// An async field validator failed to produce a verdict.
///
/// Distinct from a validation *error*: the validator could not decide (for
/// example, the availability endpoint was unreachable). The form controller
/// treats this as "no error" and logs it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Async validation failed: {0}")]
pub struct AsyncValidationError(pub String);

impl AsyncValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        AsyncValidationError(message.into())
    }
}
