//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Cart and business rule failures                │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  storefront-storage   └── StorageError  - Durable storage failures     │
//! │  storefront-api       └── ApiError      - Network / HTTP failures      │
//! │  apps/storefront      └── AppError      - What the UI layer sees       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → UI                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Validation Messages
//! `ValidationError`'s `Display` output IS the message shown under a form
//! field. Forms store `err.to_string()` directly, so each variant's format
//! string must read as a complete user-facing sentence.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product is not present (in the cart, or in a lookup).
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Quantity must be a positive integer.
    #[error("Quantity must be positive, got {0}")]
    InvalidQuantity(i64),

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Checkout was requested with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are returned as values by the validators in
/// [`crate::validation`], never thrown. The `field` strings are display
/// labels ("Email", "Password"), not JSON keys.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Email does not look like `local@domain.tld`.
    #[error("Invalid email format")]
    InvalidEmail,

    /// Password lacks a digit.
    #[error("{field} must contain at least one number")]
    MissingDigit { field: String },

    /// Two fields that must be equal differ (e.g. password confirmation).
    #[error("{field} do not match")]
    Mismatch { field: String },

    /// Value is not a finite number greater than zero.
    #[error("{field} must be a positive number")]
    NotPositiveNumber { field: String },

    /// Value is not an integer greater than or equal to zero.
    #[error("{field} must be a non-negative integer")]
    NotNonNegativeInteger { field: String },

    /// Email is already bound to an account.
    #[error("This email is already registered")]
    EmailTaken,
}

impl ValidationError {
    /// Creates a `Required` error for the given field label.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::QuantityTooLarge {
            requested: 1200,
            max: 999,
        };
        assert_eq!(err.to_string(), "Quantity 1200 exceeds maximum allowed (999)");
        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::required("Email").to_string(),
            "Email is required"
        );
        assert_eq!(
            ValidationError::TooShort {
                field: "Password".to_string(),
                min: 6,
            }
            .to_string(),
            "Password must be at least 6 characters"
        );
        assert_eq!(
            ValidationError::Mismatch {
                field: "Passwords".to_string(),
            }
            .to_string(),
            "Passwords do not match"
        );
        assert_eq!(
            ValidationError::EmailTaken.to_string(),
            "This email is already registered"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::InvalidEmail.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
