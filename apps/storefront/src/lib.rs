//! # Storefront
//!
//! Client-side state layer for the storefront: session, cart, catalog
//! browsing, search, recommendations and admin product management.
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs          ◄─── You are here (exports, logging setup)
//! ├── main.rs         ◄─── Headless bootstrap
//! ├── config.rs       ◄─── storefront.toml + STOREFRONT_* overrides
//! ├── error.rs        ◄─── AppError surfaced to the UI
//! ├── forms.rs        ◄─── Login / register / product form schemas
//! ├── guard.rs        ◄─── Route protection
//! ├── store.rs        ◄─── Storefront façade
//! └── state/
//!     ├── auth.rs            ◄─── Session + persisted token/user
//!     ├── cart.rs            ◄─── Cart rules + persisted cart + checkout
//!     ├── products.rs        ◄─── Listing, detail, related (latest wins)
//!     ├── recommendations.rs ◄─── Signed-in suggestions
//!     └── search.rs          ◄─── Debounced search-as-you-type
//! ```
//!
//! ## Startup
//! ```text
//! AppConfig::load ──► Storefront::connect ──► FileStorage (hydrate token, user, cart)
//!                                        └──► ApiClient (bearer auth, 401 handling)
//! ```

pub mod config;
pub mod error;
pub mod forms;
pub mod guard;
pub mod state;
pub mod store;

use tracing_subscriber::EnvFilter;

pub use config::{AppConfig, ConfigError};
pub use error::{AppError, AppResult, ErrorCode};
pub use guard::{Access, Route, RouteGuard};
pub use store::Storefront;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug,reqwest=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
