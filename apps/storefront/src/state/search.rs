//! # Search Session
//!
//! Search-as-you-type for the catalog search bar.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  set_query("l") ─► set_query("la") ─► set_query("lap")                  │
//! │        │                                    │                           │
//! │        └──────── Debounced<String> ─────────┘  500 ms quiet window      │
//! │                          │                                              │
//! │                          ▼ committed "lap"                              │
//! │                   listener task                                         │
//! │                          │                                              │
//! │           ""  ──► results cleared, no request                           │
//! │           "lap" ─► generation += 1, spawn search                        │
//! │                          │                                              │
//! │                          ▼                                              │
//! │              response applied only if its generation is still latest   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use storefront_api::{ApiResult, CatalogApi};
use storefront_core::{Product, ITEMS_PER_PAGE};
use storefront_forms::Debounced;

use crate::error::AppError;

/// What the search bar renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Last committed (debounced) query.
    pub query: String,
    pub category: String,
    pub results: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Default)]
struct Tracked {
    view: SearchState,
    generation: u64,
}

struct SearchInner {
    api: Arc<dyn CatalogApi>,
    limit: u32,
    tracked: Mutex<Tracked>,
}

impl SearchInner {
    /// Starts a search for `query` with the current category.
    fn dispatch(self: &Arc<Self>, query: String) {
        let (generation, category) = {
            let mut tracked = self.tracked.lock();
            tracked.generation += 1;
            tracked.view.query = query.clone();

            if query.is_empty() {
                tracked.view.results.clear();
                tracked.view.loading = false;
                tracked.view.error = None;
                debug!("Empty query; results cleared");
                return;
            }

            tracked.view.loading = true;
            tracked.view.error = None;
            (tracked.generation, tracked.view.category.clone())
        };

        debug!(%query, %category, generation, "Searching");
        let inner = Arc::clone(self);
        tokio::spawn(async move {
            let result = inner
                .api
                .search_products(&query, &category, inner.limit)
                .await;
            inner.apply(generation, result);
        });
    }

    fn apply(&self, generation: u64, result: ApiResult<Vec<Product>>) {
        let mut tracked = self.tracked.lock();
        if tracked.generation != generation {
            debug!(generation, latest = tracked.generation, "Discarding stale search results");
            return;
        }

        tracked.view.loading = false;
        match result {
            Ok(products) => tracked.view.results = products,
            Err(e) => {
                tracked.view.error = Some(AppError::from_api(e, "Search failed").message);
            }
        }
    }
}

/// A debounced, latest-wins product search.
///
/// Must be created inside a Tokio runtime. Dropping the session cancels the
/// pending debounce and stops listening.
pub struct SearchSession {
    inner: Arc<SearchInner>,
    query: Debounced<String>,
    listener: JoinHandle<()>,
}

impl SearchSession {
    pub fn new(api: Arc<dyn CatalogApi>, debounce: Duration) -> Self {
        let inner = Arc::new(SearchInner {
            api,
            limit: ITEMS_PER_PAGE,
            tracked: Mutex::new(Tracked::default()),
        });
        let query = Debounced::new(String::new(), debounce);

        let mut committed = query.subscribe();
        let listener = tokio::spawn({
            let inner = Arc::clone(&inner);
            async move {
                while committed.changed().await.is_ok() {
                    let query = committed.borrow_and_update().clone();
                    inner.dispatch(query);
                }
            }
        });

        SearchSession {
            inner,
            query,
            listener,
        }
    }

    /// Records a keystroke; the search runs once typing pauses.
    pub fn set_query(&self, query: impl Into<String>) {
        self.query.set(query.into());
    }

    /// Changes the category filter and re-runs the committed query at once.
    pub fn set_category(&self, category: impl Into<String>) {
        self.inner.tracked.lock().view.category = category.into();
        self.inner.dispatch(self.query.get());
    }

    /// Whether a keystroke is waiting out the quiet window.
    pub fn is_debouncing(&self) -> bool {
        self.query.is_pending()
    }

    pub fn snapshot(&self) -> SearchState {
        self.inner.tracked.lock().view.clone()
    }

    pub fn results(&self) -> Vec<Product> {
        self.inner.tracked.lock().view.results.clone()
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.query.cancel();
        self.listener.abort();
    }
}
