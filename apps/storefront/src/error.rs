//! # Application Error Type
//!
//! Unified error type for the storefront façade.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  UI layer                     Rust state layer                          │
//! │  ────────                     ────────────────                          │
//! │                                                                         │
//! │  storefront.checkout()                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Façade method → Result<T, AppError>                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Cart rule broken? ─── CoreError::EmptyCart ──────┐              │  │
//! │  │         │                                         │              │  │
//! │  │         ▼                                         ▼              │  │
//! │  │  Backend failed? ──── ApiError::Server ─────── AppError ───────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ───────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  match err.code {                                                       │
//! │      ErrorCode::Unauthorized => redirect to /login,                     │
//! │      _ => show err.message,                                             │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `message` is always safe to show to the user.

use serde::Serialize;
use storefront_api::{ApiError, FALLBACK_MESSAGE};
use storefront_core::{CoreError, ValidationError};
use storefront_storage::StorageError;

/// Error returned from every façade operation.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NETWORK_ERROR",
///   "message": "Network error. Please check your connection."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes surfaced to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404, or missing from the cart)
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart rule broken (empty checkout, quantity limits)
    CartError,

    /// No response from the backend
    NetworkError,

    /// Session missing or rejected (401); the session has been cleared
    Unauthorized,

    /// Signed in but not allowed (403, or not the admin account)
    Forbidden,

    /// Backend failure (5xx)
    ServerError,

    /// Any other rejected request
    RequestFailed,

    /// Durable storage failure
    StorageError,

    /// Bad configuration or unexpected response shape
    Internal,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Forbidden, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Unauthorized, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == ErrorCode::Unauthorized
    }

    /// Converts an API failure, substituting `fallback` when the backend sent
    /// no message of its own.
    pub fn from_api(err: ApiError, fallback: &str) -> Self {
        let mut app = AppError::from(err);
        if app.message == FALLBACK_MESSAGE {
            app.message = fallback.to_string();
        }
        app
    }
}

/// Converts API errors, keeping the server's message.
impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        let code = match &err {
            ApiError::Network(_) => ErrorCode::NetworkError,
            ApiError::Unauthorized { .. } => ErrorCode::Unauthorized,
            ApiError::Forbidden { .. } => ErrorCode::Forbidden,
            ApiError::Server { .. } => ErrorCode::ServerError,
            ApiError::Request { status: 404, .. } => ErrorCode::NotFound,
            ApiError::Request { .. } => ErrorCode::RequestFailed,
            ApiError::Decode(detail) => {
                tracing::error!(%detail, "Undecodable backend response");
                return AppError::internal(FALLBACK_MESSAGE);
            }
            ApiError::InvalidUrl(_) => ErrorCode::Internal,
        };
        AppError::new(code, err.to_string())
    }
}

/// Converts core errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(_) => AppError::new(ErrorCode::NotFound, err.to_string()),
            CoreError::InvalidQuantity(_)
            | CoreError::QuantityTooLarge { .. }
            | CoreError::EmptyCart => AppError::new(ErrorCode::CartError, err.to_string()),
            CoreError::Validation(e) => AppError::from(e),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        tracing::error!(error = %err, "Storage operation failed");
        AppError::new(ErrorCode::StorageError, "Could not access local storage")
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Result type for façade operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_errors_keep_server_message() {
        let err: AppError = ApiError::from_status(404, br#"{"error": "Product not found"}"#).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found");

        let err: AppError = ApiError::from_status(401, b"{}").into();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_fallback_replaces_generic_message() {
        let err = AppError::from_api(ApiError::from_status(500, b""), "Checkout failed");
        assert_eq!(err.code, ErrorCode::ServerError);
        assert_eq!(err.message, "Checkout failed");

        let err = AppError::from_api(
            ApiError::from_status(400, br#"{"error": "Email already exists"}"#),
            "Registration failed",
        );
        assert_eq!(err.message, "Email already exists");
    }

    #[test]
    fn test_core_errors_map_to_codes() {
        assert_eq!(AppError::from(CoreError::EmptyCart).code, ErrorCode::CartError);
        assert_eq!(
            AppError::from(CoreError::ProductNotFound("p1".into())).code,
            ErrorCode::NotFound
        );
        let err = AppError::from(CoreError::Validation(ValidationError::InvalidEmail));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Invalid email format");
    }

    #[test]
    fn test_serializes_screaming_snake_code() {
        let json = serde_json::to_value(AppError::new(ErrorCode::NetworkError, "x")).unwrap();
        assert_eq!(json["code"], "NETWORK_ERROR");
        assert_eq!(json["message"], "x");
    }
}
