//! # storefront-storage: Durable Local State
//!
//! The storefront client keeps three documents across restarts: the bearer
//! token, the signed-in user and the cart. This crate stores them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Data Flow                               │
//! │                                                                         │
//! │  AuthState / CartState (apps/storefront)     ApiClient (storefront-api)│
//! │       │  persist on every mutation                │ read token per req │
//! │       ▼                                           ▼                     │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                storefront-storage (THIS CRATE)                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ Storage trait │    │  FileStorage  │    │MemoryStorage │  │   │
//! │  │   │ get/set/remove│◄───│ <key>.json    │    │ tests        │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/storefront/{token,user,cart}.json                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use storefront_storage::{keys, MemoryStorage, Storage, StorageExt};
//!
//! let storage = MemoryStorage::new();
//! storage.set(keys::TOKEN, "jwt").unwrap();
//! assert_eq!(storage.get(keys::TOKEN).unwrap().as_deref(), Some("jwt"));
//!
//! storage.persist(keys::CART, &Vec::<u32>::new());
//! assert_eq!(storage.load_json::<Vec<u32>>(keys::CART), Some(vec![]));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StorageError, StorageResult};
pub use store::{FileStorage, MemoryStorage, Storage, StorageExt};

use directories::ProjectDirs;
use std::path::PathBuf;

/// Well-known storage keys.
pub mod keys {
    /// Bearer token (raw string, not JSON).
    pub const TOKEN: &str = "token";
    /// Signed-in user profile (JSON).
    pub const USER: &str = "user";
    /// Cart contents: productId → {product, quantity} (JSON).
    pub const CART: &str = "cart";
}

/// Platform data directory for the storefront client.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.storefront.storefront`
/// - **Windows**: `%APPDATA%\storefront\storefront\data`
/// - **Linux**: `~/.local/share/storefront`
pub fn default_data_dir() -> StorageResult<PathBuf> {
    ProjectDirs::from("com", "storefront", "storefront")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StorageError::NoDataDir)
}
