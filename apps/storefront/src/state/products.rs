//! # Products State
//!
//! Catalog listing, search results and the product detail page.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fetch_products / search / fetch_by_category ──► items                  │
//! │  fetch_product ─────────────────────────────────► selected              │
//! │  fetch_related ─────────────────────────────────► related               │
//! │                                                                         │
//! │  Each listing call takes a ticket; only the newest ticket may write     │
//! │  `items`, so a slow page can't overwrite a newer search.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use storefront_api::{ApiResult, CatalogApi};
use storefront_core::Product;

use crate::error::{AppError, AppResult};

/// Snapshot of the products slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductsState {
    pub items: Vec<Product>,
    pub selected: Option<Product>,
    pub related: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Default)]
struct Inner {
    view: ProductsState,
    /// Ticket of the newest listing request.
    latest: u64,
}

/// Products slice.
pub struct ProductsSlice {
    api: Arc<dyn CatalogApi>,
    inner: Mutex<Inner>,
}

impl ProductsSlice {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        ProductsSlice {
            api,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn snapshot(&self) -> ProductsState {
        self.inner.lock().view.clone()
    }

    pub fn items(&self) -> Vec<Product> {
        self.inner.lock().view.items.clone()
    }

    pub fn selected(&self) -> Option<Product> {
        self.inner.lock().view.selected.clone()
    }

    // =========================================================================
    // Listings
    // =========================================================================

    /// One catalog page.
    pub async fn fetch_products(&self, limit: u32, offset: u32) -> AppResult<Vec<Product>> {
        let ticket = self.begin();
        let result = self.api.list_products(limit, offset).await;
        self.finish_listing(ticket, result, "Failed to fetch products")
    }

    /// Full-text search; an empty `category` searches everything.
    pub async fn search(&self, query: &str, category: &str, limit: u32) -> AppResult<Vec<Product>> {
        let ticket = self.begin();
        let result = self.api.search_products(query, category, limit).await;
        self.finish_listing(ticket, result, "Search failed")
    }

    pub async fn fetch_by_category(&self, category: &str, limit: u32) -> AppResult<Vec<Product>> {
        let ticket = self.begin();
        let result = self.api.products_by_category(category, limit).await;
        self.finish_listing(ticket, result, "Failed to fetch products")
    }

    fn begin(&self) -> u64 {
        let mut inner = self.inner.lock();
        inner.latest += 1;
        inner.view.loading = true;
        inner.view.error = None;
        inner.latest
    }

    fn finish_listing(
        &self,
        ticket: u64,
        result: ApiResult<Vec<Product>>,
        fallback: &str,
    ) -> AppResult<Vec<Product>> {
        let mut inner = self.inner.lock();
        let current = inner.latest == ticket;
        if !current {
            debug!(ticket, latest = inner.latest, "Discarding superseded listing");
        }

        match result {
            Ok(products) => {
                if current {
                    inner.view.loading = false;
                    inner.view.items = products.clone();
                }
                Ok(products)
            }
            Err(e) => {
                let err = AppError::from_api(e, fallback);
                if current {
                    inner.view.loading = false;
                    inner.view.error = Some(err.message.clone());
                }
                Err(err)
            }
        }
    }

    // =========================================================================
    // Detail
    // =========================================================================

    /// Loads the detail page product into `selected`.
    pub async fn fetch_product(&self, id: &str) -> AppResult<Product> {
        {
            let mut inner = self.inner.lock();
            inner.view.loading = true;
            inner.view.error = None;
        }

        let result = self.api.get_product(id).await;

        let mut inner = self.inner.lock();
        inner.view.loading = false;
        match result {
            Ok(product) => {
                inner.view.selected = Some(product.clone());
                Ok(product)
            }
            Err(e) => {
                let err = AppError::from_api(e, "Product not found");
                inner.view.error = Some(err.message.clone());
                Err(err)
            }
        }
    }

    /// Loads "you may also like" products for the detail page.
    ///
    /// Failures leave `related` empty and do not touch `error`.
    pub async fn fetch_related(&self, id: &str, limit: u32) -> AppResult<Vec<Product>> {
        match self.api.related_products(id, limit).await {
            Ok(products) => {
                self.inner.lock().view.related = products.clone();
                Ok(products)
            }
            Err(e) => {
                warn!(product_id = %id, error = %e, "Failed to load related products");
                self.inner.lock().view.related.clear();
                Err(AppError::from(e))
            }
        }
    }

    // =========================================================================
    // Local Updates
    // =========================================================================

    pub fn clear_products(&self) {
        self.inner.lock().view.items.clear();
    }

    pub fn clear_selected_product(&self) {
        let mut inner = self.inner.lock();
        inner.view.selected = None;
        inner.view.related.clear();
    }

    /// Replaces a product wherever it is shown (after an admin edit).
    pub fn upsert(&self, product: &Product) {
        let mut inner = self.inner.lock();
        match inner.view.items.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product.clone(),
            None => inner.view.items.push(product.clone()),
        }
        if inner
            .view
            .selected
            .as_ref()
            .is_some_and(|p| p.id == product.id)
        {
            inner.view.selected = Some(product.clone());
        }
    }

    /// Drops a product from every view (after an admin delete).
    pub fn remove(&self, id: &str) {
        let mut inner = self.inner.lock();
        inner.view.items.retain(|p| p.id != id);
        inner.view.related.retain(|p| p.id != id);
        if inner.view.selected.as_ref().is_some_and(|p| p.id == id) {
            inner.view.selected = None;
        }
    }
}
