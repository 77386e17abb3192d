//! # storefront-api: REST Client for the Storefront Backend
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Storefront façade (apps/storefront)                                   │
//! │       │  Arc<dyn StorefrontApi>                                         │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                storefront-api (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────┐   ┌──────────────┐   ┌──────────────────┐   │   │
//! │  │   │  endpoints   │──►│   ApiClient  │──►│    ApiError      │   │   │
//! │  │   │  Auth/Catalog│   │   reqwest    │   │  status mapping  │   │   │
//! │  │   │  Interactions│   │   + token    │   │                  │   │   │
//! │  │   └──────────────┘   └──────┬───────┘   └──────────────────┘   │   │
//! │  └─────────────────────────────┼───────────────────────────────────┘   │
//! │                                │ reads token / clears on 401            │
//! │                                ▼                                        │
//! │                        storefront-storage                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront_api::{ApiClient, ApiConfig, CatalogApi};
//! use storefront_storage::MemoryStorage;
//!
//! let config = ApiConfig::new("http://localhost:8080/api/v1")?;
//! let api = ApiClient::new(&config, Arc::new(MemoryStorage::new()))?;
//! let first_page = api.list_products(20, 0).await?;
//! ```
//!
//! No request is ever retried here; callers decide what to do with a failure.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;

pub use client::{ApiClient, REQUEST_ID_HEADER};
pub use config::{ApiConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use endpoints::{
    AuthApi, CatalogApi, InteractionsApi, RecommendationsApi, StorefrontApi,
    RECOMMENDATIONS_LIMIT, RELATED_PRODUCTS_LIMIT,
};
pub use error::{ApiError, ApiResult, FALLBACK_MESSAGE, NETWORK_MESSAGE};
