//! # API Error Types
//!
//! ## Status Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  no response (connect, timeout)  → Network       status 0              │
//! │  401                             → Unauthorized  session cleared        │
//! │  403                             → Forbidden                           │
//! │  5xx                             → Server        logged at error        │
//! │  other non-2xx                   → Request                             │
//! │  2xx with an unreadable body     → Decode        status -1             │
//! │  bad base URL / path             → InvalidUrl    status -1             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `Display` text of every variant is safe to show to the user. For HTTP
//! failures it is the server's own `error` (or `message`) field.

use serde_json::Value;
use thiserror::Error;

/// Shown when an error body carries no usable message.
pub const FALLBACK_MESSAGE: &str = "An error occurred";

/// Shown when the server could not be reached.
pub const NETWORK_MESSAGE: &str = "Network error. Please check your connection.";

/// REST client failures.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never got a response.
    #[error("Network error. Please check your connection.")]
    Network(#[source] reqwest::Error),

    /// 401: token missing, expired or rejected.
    #[error("{message}")]
    Unauthorized { message: String },

    /// 403: authenticated but not allowed.
    #[error("{message}")]
    Forbidden { message: String },

    /// 5xx.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Any other non-2xx status.
    #[error("{message}")]
    Request { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("Unexpected response from server: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Builds the error for a non-2xx response from its status and body.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let message = error_message(body);
        match status {
            401 => ApiError::Unauthorized { message },
            403 => ApiError::Forbidden { message },
            500..=599 => ApiError::Server { status, message },
            _ => ApiError::Request { status, message },
        }
    }

    /// HTTP-ish status: `0` for network failures, `-1` for local failures.
    pub fn status(&self) -> i32 {
        match self {
            ApiError::Network(_) => 0,
            ApiError::Unauthorized { .. } => 401,
            ApiError::Forbidden { .. } => 403,
            ApiError::Server { status, .. } | ApiError::Request { status, .. } => {
                i32::from(*status)
            }
            ApiError::Decode(_) | ApiError::InvalidUrl(_) => -1,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

/// Extracts `error`, then `message`, from a JSON error body.
fn error_message(body: &[u8]) -> String {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();
    parsed
        .as_ref()
        .and_then(|v| {
            ["error", "message"]
                .iter()
                .filter_map(|key| v.get(key).and_then(Value::as_str))
                .find(|s| !s.is_empty())
        })
        .unwrap_or(FALLBACK_MESSAGE)
        .to_string()
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
