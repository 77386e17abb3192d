//! # Storage Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError (this module)                                            │
//! │       │                                                                 │
//! │       ├──► slices log it at warn and carry on (best-effort writes)     │
//! │       ▼                                                                 │
//! │  AppError (apps/storefront) when surfaced at startup                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Durable storage failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    ///
    /// ## When This Occurs
    /// - Data directory can't be created
    /// - Permission denied
    /// - Disk full
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be encoded or decoded as JSON.
    #[error("Storage serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key is empty or contains characters that are unsafe in a file name.
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// No platform data directory could be resolved.
    #[error("Could not determine a data directory")]
    NoDataDir,
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
