//! # Cart State
//!
//! The shopping cart, persisted to durable storage on every mutation.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action                 Slice Method             Cart Change         │
//! │  ─────────                 ────────────             ───────────         │
//! │                                                                         │
//! │  "Add to cart" ──────────► add() ──────────────────► qty += n, open     │
//! │                                                                         │
//! │  Change quantity ────────► update_quantity() ──────► qty = n (≤0 drops) │
//! │                                                                         │
//! │  Click remove ───────────► remove() ───────────────► entry deleted      │
//! │                                                                         │
//! │  Click clear ────────────► clear() ────────────────► {}                 │
//! │                                                                         │
//! │  Click checkout ─────────► checkout().await                             │
//! │                               ├── Ok  ─► purchased lines out, closed    │
//! │                               └── Err ─► untouched, checkout_error      │
//! │                                                                         │
//! │  Every change above is written to storage key "cart".                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use storefront_api::InteractionsApi;
use storefront_core::{
    CoreError, CoreResult, Money, Product, PurchaseItem, PurchaseRecord, PurchaseStatus,
    MAX_ITEM_QUANTITY,
};
use storefront_storage::{keys, Storage, StorageExt};

use crate::error::{AppError, AppResult, ErrorCode};

/// A product in the cart.
///
/// The product is a snapshot taken when it was last added, so the cart
/// renders without a catalog round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: i64,
}

impl CartItem {
    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price * self.quantity
    }
}

/// Cart contents keyed by product id.
///
/// ## Invariants
/// - One entry per product id
/// - Every quantity is in `1..=MAX_ITEM_QUANTITY`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: BTreeMap<String, CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units, merging with an existing entry.
    pub fn add(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity(quantity));
        }

        let existing = self.items.get(&product.id).map_or(0, |item| item.quantity);
        let new_qty = existing.saturating_add(quantity);
        if new_qty > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: new_qty,
                max: MAX_ITEM_QUANTITY,
            });
        }

        self.items.insert(
            product.id.clone(),
            CartItem {
                product: product.clone(),
                quantity: new_qty,
            },
        );
        Ok(())
    }

    /// Removes an entry. Returns whether it was present.
    pub fn remove(&mut self, product_id: &str) -> bool {
        self.items.remove(product_id).is_some()
    }

    /// Sets an entry's quantity; zero or less removes it.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            self.items.remove(product_id);
            return Ok(());
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        match self.items.get_mut(product_id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::ProductNotFound(product_id.to_string())),
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Takes the quantities in `record` out of the cart, dropping entries
    /// that reach zero. Units added after the record was built stay.
    pub fn settle(&mut self, record: &PurchaseRecord) {
        for line in &record.products {
            let left = self
                .items
                .get(&line.product_id)
                .map(|item| item.quantity - line.quantity);
            match left {
                Some(left) if left > 0 => {
                    if let Some(item) = self.items.get_mut(&line.product_id) {
                        item.quantity = left;
                    }
                }
                Some(_) => {
                    self.items.remove(&line.product_id);
                }
                None => {}
            }
        }
    }

    pub fn get(&self, product_id: &str) -> Option<&CartItem> {
        self.items.get(product_id)
    }

    pub fn items(&self) -> impl Iterator<Item = &CartItem> {
        self.items.values()
    }

    /// Sum of price × quantity.
    pub fn total(&self) -> Money {
        self.items.values().map(CartItem::line_total).sum()
    }

    /// Sum of quantities (the header badge).
    pub fn item_count(&self) -> i64 {
        self.items.values().map(|item| item.quantity).sum()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The record sent to `POST /interactions/purchase`.
    pub fn purchase_record(&self) -> CoreResult<PurchaseRecord> {
        if self.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let products = self
            .items
            .values()
            .map(|item| PurchaseItem {
                product_id: item.product.id.clone(),
                quantity: item.quantity,
                price: item.product.price,
            })
            .collect();

        Ok(PurchaseRecord {
            products,
            total: self.total(),
            status: PurchaseStatus::Completed,
        })
    }
}

/// Cart totals summary for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub distinct_items: usize,
    pub item_count: i64,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            distinct_items: cart.len(),
            item_count: cart.item_count(),
            total: cart.total(),
        }
    }
}

/// Snapshot of the cart slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    pub cart: Cart,
    pub is_open: bool,
    pub checkout_loading: bool,
    pub checkout_error: Option<String>,
}

/// Cart slice.
pub struct CartSlice {
    api: Arc<dyn InteractionsApi>,
    storage: Arc<dyn Storage>,
    state: Mutex<CartState>,
}

impl CartSlice {
    /// Creates the slice with the cart left in `storage`, if any.
    pub fn new(api: Arc<dyn InteractionsApi>, storage: Arc<dyn Storage>) -> Self {
        let cart: Cart = storage.load_json(keys::CART).unwrap_or_default();
        debug!(items = cart.len(), "Cart hydrated");

        CartSlice {
            api,
            storage,
            state: Mutex::new(CartState {
                cart,
                ..CartState::default()
            }),
        }
    }

    pub fn snapshot(&self) -> CartState {
        self.state.lock().clone()
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        f(&self.state.lock().cart)
    }

    pub fn totals(&self) -> CartTotals {
        self.with_cart(|cart| CartTotals::from(cart))
    }

    /// Applies `f` to the cart and persists the result if it succeeded.
    fn mutate<F, R>(&self, f: F) -> CoreResult<R>
    where
        F: FnOnce(&mut CartState) -> CoreResult<R>,
    {
        let mut state = self.state.lock();
        let result = f(&mut state)?;
        self.storage.persist(keys::CART, &state.cart);
        Ok(result)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a product and opens the cart view.
    pub fn add(&self, product: &Product, quantity: i64) -> AppResult<()> {
        self.mutate(|state| {
            state.cart.add(product, quantity)?;
            state.is_open = true;
            Ok(())
        })?;
        debug!(product_id = %product.id, quantity, "Added to cart");
        Ok(())
    }

    pub fn remove(&self, product_id: &str) -> bool {
        // Infallible closure
        self.mutate(|state| Ok(state.cart.remove(product_id)))
            .unwrap_or(false)
    }

    pub fn update_quantity(&self, product_id: &str, quantity: i64) -> AppResult<()> {
        self.mutate(|state| state.cart.update_quantity(product_id, quantity))?;
        Ok(())
    }

    pub fn clear(&self) {
        let _ = self.mutate(|state| {
            state.cart.clear();
            Ok(())
        });
    }

    pub fn set_open(&self, open: bool) {
        self.state.lock().is_open = open;
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Records the purchase with the backend, then takes the purchased
    /// units out of the cart and closes it. On failure the cart is left as
    /// it was. Lines added while the request is in flight survive.
    pub async fn checkout(&self) -> AppResult<PurchaseRecord> {
        let record = {
            let mut state = self.state.lock();
            if state.checkout_loading {
                return Err(AppError::new(
                    ErrorCode::CartError,
                    "Checkout already in progress",
                ));
            }
            let record = state.cart.purchase_record()?;
            state.checkout_loading = true;
            state.checkout_error = None;
            record
        };

        // Cleared even if this future is dropped mid-request
        let loading = scopeguard::guard((), |_| {
            self.state.lock().checkout_loading = false;
        });

        let result = self.api.record_purchase(&record).await;
        drop(loading);

        let mut state = self.state.lock();
        match result {
            Ok(()) => {
                state.cart.settle(&record);
                state.is_open = false;
                self.storage.persist(keys::CART, &state.cart);
                info!(
                    lines = record.products.len(),
                    total_cents = record.total.cents(),
                    left = state.cart.len(),
                    "Checkout completed"
                );
                Ok(record)
            }
            Err(e) => {
                let err = AppError::from_api(e, "Checkout failed");
                warn!(code = ?err.code, "Checkout failed");
                state.checkout_error = Some(err.message.clone());
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for CartSlice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartSlice")
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}
