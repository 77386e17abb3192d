//! # storefront-core: Pure Business Logic for the Storefront Client
//!
//! This crate is the **heart** of the storefront client. It contains the
//! domain model and every rule that can be expressed without I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Client Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI Layer (not in this repo)                  │   │
//! │  │    Catalog ──► Product Detail ──► Cart ──► Checkout            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 Storefront façade (apps/storefront)             │   │
//! │  │    auth slice, cart slice, products slice, route guards        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ validation│  │  format   │  │   │
//! │  │   │  Product  │  │   Money   │  │  email    │  │  price    │  │   │
//! │  │   │  User     │  │  (cents)  │  │  password │  │  date     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, User, AuthSession, PurchaseRecord, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation rules used by every form
//! - [`format`] - Display formatting (prices, numbers, dates, truncation)
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::money::Money;
//! use storefront_core::validation::validate_password;
//!
//! let price = Money::from_cents(1099);
//! assert_eq!((price * 2).cents(), 2198);
//!
//! let err = validate_password("abcdef").unwrap_err();
//! assert_eq!(err.to_string(), "Password must contain at least one number");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod format;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Email address that unlocks the admin console.
///
/// The backend has no role claim yet, so admin access is keyed on the
/// account email.
pub const ADMIN_EMAIL: &str = "user1@example.com";

/// Default page size for catalog listings and searches.
pub const ITEMS_PER_PAGE: u32 = 20;

/// Maximum quantity of a single product in the cart.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Product categories offered by the catalog.
pub const CATEGORIES: [&str; 8] = [
    "Electronics",
    "Clothing",
    "Books",
    "Home & Garden",
    "Sports",
    "Toys",
    "Health and Beauty",
    "Accessories",
];
