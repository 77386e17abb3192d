//! # State Module
//!
//! Independent state slices, each owning its own lock and the endpoint
//! group it needs. The [`Storefront`](crate::Storefront) façade composes them.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌────────────────┐  │
//! │  │  AuthSlice   │ │  CartSlice   │ │ProductsSlice │ │Recommendations │  │
//! │  │              │ │              │ │              │ │     Slice      │  │
//! │  │  AuthApi     │ │InteractionsApi│ │ CatalogApi  │ │RecommendationsApi│ │
//! │  │  Storage     │ │  Storage     │ │              │ │                │  │
//! │  │  token,user  │ │  cart        │ │              │ │                │  │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └────────────────┘  │
//! │                                                                         │
//! │  SearchSession: one per search bar, owns a debounce and a listener task │
//! │                                                                         │
//! │  THREAD SAFETY:                                                         │
//! │  • Every slice keeps its view in a parking_lot::Mutex                   │
//! │  • Locks are never held across an .await                                │
//! │  • snapshot() returns an owned copy for rendering                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod auth;
mod cart;
mod products;
mod recommendations;
mod search;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{AuthSlice, AuthState};
pub use cart::{Cart, CartItem, CartSlice, CartState, CartTotals};
pub use products::{ProductsSlice, ProductsState};
pub use recommendations::{RecommendationsSlice, RecommendationsState};
pub use search::{SearchSession, SearchState};
