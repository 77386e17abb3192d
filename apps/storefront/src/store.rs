//! # Storefront Façade
//!
//! The single state interface the UI talks to. It owns every slice and adds
//! the cross-slice rules none of them can enforce alone.
//!
//! ## Cross-Slice Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  any call ──► ApiError::Unauthorized ──► auth.force_logout()            │
//! │                                          recommendations.clear()        │
//! │                                                                         │
//! │  add_to_cart ──► cart.add ──► record "cart" interaction (best effort)   │
//! │  view_product ─► detail + related ──► record "view" (best effort)       │
//! │  like_product ─► requires sign-in ──► record "like"                     │
//! │  admin CRUD ───► RouteGuard::Admin must allow                           │
//! │  login/logout ─► recommendations belong to one user; cleared            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Best-effort tracking only happens while signed in; failures are logged
//! and never reach the caller.

use std::sync::Arc;

use tracing::{debug, info, warn};

use storefront_api::{
    ApiClient, CatalogApi, InteractionsApi, StorefrontApi, RECOMMENDATIONS_LIMIT,
    RELATED_PRODUCTS_LIMIT,
};
use storefront_core::{
    Credentials, InteractionKind, Product, ProductDraft, Purchase, PurchaseRecord,
    Recommendation, RecommendationAlgorithm, RegisterRequest, User, UserPatch, ITEMS_PER_PAGE,
};
use storefront_forms::{EmailAvailability, FormController};
use storefront_storage::{FileStorage, Storage};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::forms;
use crate::guard::{Access, RouteGuard};
use crate::state::{AuthSlice, CartSlice, ProductsSlice, RecommendationsSlice, SearchSession};

/// Application state root.
pub struct Storefront {
    config: AppConfig,
    catalog: Arc<dyn CatalogApi>,
    interactions: Arc<dyn InteractionsApi>,
    auth: AuthSlice,
    cart: CartSlice,
    products: ProductsSlice,
    recommendations: RecommendationsSlice,
}

impl Storefront {
    /// Builds the store over any backend implementation.
    pub fn new<A>(api: Arc<A>, storage: Arc<dyn Storage>, config: AppConfig) -> Self
    where
        A: StorefrontApi + 'static,
    {
        Storefront {
            auth: AuthSlice::new(api.clone(), storage.clone()),
            cart: CartSlice::new(api.clone(), storage),
            products: ProductsSlice::new(api.clone()),
            recommendations: RecommendationsSlice::new(api.clone()),
            catalog: api.clone(),
            interactions: api,
            config,
        }
    }

    /// Builds the store against the real backend and on-disk storage.
    pub fn connect(config: AppConfig) -> AppResult<Self> {
        let data_dir = config.resolve_data_dir()?;
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(&data_dir)?);
        let api = Arc::new(ApiClient::new(&config.api_config()?, storage.clone())?);

        info!(api_url = %api.base_url(), data_dir = ?data_dir, "Storefront connected");
        Ok(Self::new(api, storage, config))
    }

    // =========================================================================
    // Slice Access
    // =========================================================================

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn auth(&self) -> &AuthSlice {
        &self.auth
    }

    pub fn cart(&self) -> &CartSlice {
        &self.cart
    }

    pub fn products(&self) -> &ProductsSlice {
        &self.products
    }

    pub fn recommendations(&self) -> &RecommendationsSlice {
        &self.recommendations
    }

    /// Guard outcome for a screen under the current session.
    pub fn access(&self, guard: RouteGuard) -> Access {
        guard.check(&self.auth.snapshot())
    }

    /// New search-as-you-type session. Requires a Tokio runtime.
    pub fn search_session(&self) -> SearchSession {
        SearchSession::new(self.catalog.clone(), self.config.search_debounce())
    }

    pub fn login_form(&self) -> FormController {
        forms::login_form()
    }

    /// Registration form with the email availability check.
    pub fn register_form(&self) -> FormController {
        forms::register_form(
            Arc::new(EmailAvailability::new()),
            self.config.validation_debounce(),
        )
    }

    /// Admin product form, pre-filled when editing.
    pub fn product_form(&self, editing: Option<&Product>) -> FormController {
        forms::product_form(editing)
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Not routed through `guard`: a 401 here rejects the credentials and
    /// leaves any current session alone.
    pub async fn login(&self, credentials: &Credentials) -> AppResult<User> {
        let user = self.auth.login(credentials).await?;
        self.recommendations.clear();
        Ok(user)
    }

    pub async fn register(&self, request: &RegisterRequest) -> AppResult<User> {
        let user = self.auth.register(request).await?;
        self.recommendations.clear();
        Ok(user)
    }

    pub fn logout(&self) {
        self.auth.logout();
        self.recommendations.clear();
    }

    pub fn update_user(&self, patch: UserPatch) -> Option<User> {
        self.auth.update_user(patch)
    }

    /// Clears session state when the backend rejected the token.
    fn guard<T>(&self, result: AppResult<T>) -> AppResult<T> {
        if let Err(err) = &result {
            if err.is_unauthorized() {
                self.auth.force_logout();
                self.recommendations.clear();
            }
        }
        result
    }

    fn require_signed_in(&self, message: &str) -> AppResult<()> {
        match self.access(RouteGuard::Authenticated) {
            Access::Allow => Ok(()),
            _ => Err(AppError::unauthorized(message)),
        }
    }

    fn require_admin(&self) -> AppResult<()> {
        match self.access(RouteGuard::Admin) {
            Access::Allow => Ok(()),
            _ if !self.auth.is_authenticated() => {
                Err(AppError::unauthorized("Please login to continue"))
            }
            _ => Err(AppError::forbidden("Admin access required")),
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Loads catalog page `page` (zero-based).
    pub async fn load_products(&self, page: u32) -> AppResult<Vec<Product>> {
        let offset = page.saturating_mul(ITEMS_PER_PAGE);
        let result = self.products.fetch_products(ITEMS_PER_PAGE, offset).await;
        self.guard(result)
    }

    pub async fn search(&self, query: &str, category: &str) -> AppResult<Vec<Product>> {
        let result = self.products.search(query, category, ITEMS_PER_PAGE).await;
        self.guard(result)
    }

    pub async fn browse_category(&self, category: &str) -> AppResult<Vec<Product>> {
        let result = self
            .products
            .fetch_by_category(category, ITEMS_PER_PAGE)
            .await;
        self.guard(result)
    }

    /// Opens the detail page: product, related products and a view signal.
    ///
    /// Related products are optional; only the product itself can fail.
    pub async fn view_product(&self, id: &str) -> AppResult<Product> {
        let product = self.guard(self.products.fetch_product(id).await)?;

        if let Err(e) = self.products.fetch_related(id, RELATED_PRODUCTS_LIMIT).await {
            debug!(product_id = %id, error = %e, "No related products");
        }
        self.track(InteractionKind::View, id).await;

        Ok(product)
    }

    pub async fn like_product(&self, id: &str) -> AppResult<()> {
        self.require_signed_in("Please login to like products")?;
        let result = self
            .interactions
            .record(InteractionKind::Like, id)
            .await
            .map_err(AppError::from);
        self.guard(result)
    }

    /// Records a signal without surfacing failures.
    async fn track(&self, kind: InteractionKind, product_id: &str) {
        if !self.auth.is_authenticated() {
            return;
        }
        if let Err(e) = self.interactions.record(kind, product_id).await {
            warn!(%kind, product_id = %product_id, error = %e, "Failed to record interaction");
            let _ = self.guard::<()>(Err(AppError::from(e)));
        }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Adds to the cart, then records a cart signal.
    pub async fn add_to_cart(&self, product: &Product, quantity: i64) -> AppResult<()> {
        self.cart.add(product, quantity)?;
        self.track(InteractionKind::Cart, &product.id).await;
        Ok(())
    }

    pub fn remove_from_cart(&self, product_id: &str) -> bool {
        self.cart.remove(product_id)
    }

    pub fn update_cart_quantity(&self, product_id: &str, quantity: i64) -> AppResult<()> {
        self.cart.update_quantity(product_id, quantity)
    }

    pub fn clear_cart(&self) {
        self.cart.clear();
    }

    pub async fn checkout(&self) -> AppResult<PurchaseRecord> {
        let result = self.cart.checkout().await;
        self.guard(result)
    }

    pub async fn purchase_history(&self) -> AppResult<Vec<Purchase>> {
        self.require_signed_in("Please login to view your orders")?;
        let result = self.interactions.history().await.map_err(AppError::from);
        self.guard(result)
    }

    // =========================================================================
    // Recommendations
    // =========================================================================

    pub async fn load_recommendations(
        &self,
        algorithm: RecommendationAlgorithm,
    ) -> AppResult<Option<Recommendation>> {
        let result = self
            .recommendations
            .fetch(
                self.auth.is_authenticated(),
                algorithm,
                RECOMMENDATIONS_LIMIT,
            )
            .await;
        self.guard(result)
    }

    // =========================================================================
    // Admin
    // =========================================================================

    pub async fn create_product(&self, draft: &ProductDraft) -> AppResult<Product> {
        self.require_admin()?;
        let result = self.catalog.create_product(draft).await.map_err(AppError::from);
        let product = self.guard(result)?;
        self.products.upsert(&product);
        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    pub async fn update_product(&self, id: &str, draft: &ProductDraft) -> AppResult<Product> {
        self.require_admin()?;
        let result = self
            .catalog
            .update_product(id, draft)
            .await
            .map_err(AppError::from);
        let product = self.guard(result)?;
        self.products.upsert(&product);
        info!(product_id = %id, "Product updated");
        Ok(product)
    }

    pub async fn delete_product(&self, id: &str) -> AppResult<()> {
        self.require_admin()?;
        let result = self.catalog.delete_product(id).await.map_err(AppError::from);
        self.guard(result)?;
        self.products.remove(id);
        info!(product_id = %id, "Product deleted");
        Ok(())
    }
}
