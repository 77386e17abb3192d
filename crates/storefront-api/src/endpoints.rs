//! # Endpoint Traits
//!
//! One trait per backend area. [`ApiClient`] implements all of them; the
//! application layer holds them as trait objects so tests can swap in fakes.
//!
//! ```text
//! AuthApi             POST /auth/login, /auth/register
//! CatalogApi          GET  /products, /products/{id}, /products/search,
//!                          /products/{id}/related
//!                     POST/PUT/DELETE /admin/products[/{id}]
//! InteractionsApi     POST /interactions/{view,like,cart,purchase}
//!                     GET  /users/history
//! RecommendationsApi  GET  /recommendations[/collaborative|/content-based]
//! ```

use async_trait::async_trait;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use storefront_core::{
    null_as_default, AuthSession, Credentials, InteractionKind, Product, ProductDraft, Purchase,
    PurchaseRecord, Recommendation, RecommendationAlgorithm, RegisterRequest,
};

use crate::client::ApiClient;
use crate::error::ApiResult;

/// Default number of related products on a detail page.
pub const RELATED_PRODUCTS_LIMIT: u32 = 5;

/// Default number of recommendations requested.
pub const RECOMMENDATIONS_LIMIT: u32 = 10;

// =============================================================================
// Wire Envelopes
// =============================================================================

/// `{ "products": [...] }`; missing or null means no products.
#[derive(Debug, Default, Deserialize)]
struct ProductList {
    #[serde(default, deserialize_with = "null_as_default")]
    products: Vec<Product>,
}

/// `{ "purchases": [...] }`
#[derive(Debug, Default, Deserialize)]
struct PurchaseHistory {
    #[serde(default, deserialize_with = "null_as_default")]
    purchases: Vec<Purchase>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InteractionBody<'a> {
    product_id: &'a str,
}

// =============================================================================
// Traits
// =============================================================================

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthSession>;
    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthSession>;
}

#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// One catalog page.
    async fn list_products(&self, limit: u32, offset: u32) -> ApiResult<Vec<Product>>;

    async fn get_product(&self, id: &str) -> ApiResult<Product>;

    /// Full-text search; an empty `category` searches every category.
    async fn search_products(&self, query: &str, category: &str, limit: u32)
        -> ApiResult<Vec<Product>>;

    async fn products_by_category(&self, category: &str, limit: u32) -> ApiResult<Vec<Product>>;

    async fn related_products(&self, id: &str, limit: u32) -> ApiResult<Vec<Product>>;

    async fn create_product(&self, draft: &ProductDraft) -> ApiResult<Product>;

    async fn update_product(&self, id: &str, draft: &ProductDraft) -> ApiResult<Product>;

    async fn delete_product(&self, id: &str) -> ApiResult<()>;
}

#[async_trait]
pub trait InteractionsApi: Send + Sync {
    /// Records a view, like or cart signal for a product.
    ///
    /// Purchases carry a full record; use [`InteractionsApi::record_purchase`].
    async fn record(&self, kind: InteractionKind, product_id: &str) -> ApiResult<()>;

    async fn record_purchase(&self, purchase: &PurchaseRecord) -> ApiResult<()>;

    /// The signed-in user's past purchases.
    async fn history(&self) -> ApiResult<Vec<Purchase>>;
}

#[async_trait]
pub trait RecommendationsApi: Send + Sync {
    async fn recommendations(
        &self,
        algorithm: RecommendationAlgorithm,
        limit: u32,
    ) -> ApiResult<Recommendation>;
}

/// Every endpoint group at once.
pub trait StorefrontApi: AuthApi + CatalogApi + InteractionsApi + RecommendationsApi {}

impl<T> StorefrontApi for T where T: AuthApi + CatalogApi + InteractionsApi + RecommendationsApi {}

// =============================================================================
// ApiClient Implementations
// =============================================================================

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthSession> {
        self.post("/auth/login", credentials).await
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthSession> {
        self.post("/auth/register", request).await
    }
}

#[async_trait]
impl CatalogApi for ApiClient {
    async fn list_products(&self, limit: u32, offset: u32) -> ApiResult<Vec<Product>> {
        let query = [("limit", limit.to_string()), ("offset", offset.to_string())];
        let list: ProductList = self.get("/products", &query).await?;
        Ok(list.products)
    }

    async fn get_product(&self, id: &str) -> ApiResult<Product> {
        self.get(&format!("/products/{}", id), &[]).await
    }

    async fn search_products(
        &self,
        query: &str,
        category: &str,
        limit: u32,
    ) -> ApiResult<Vec<Product>> {
        let params = [
            ("q", query.to_string()),
            ("category", category.to_string()),
            ("limit", limit.to_string()),
        ];
        let list: ProductList = self.get("/products/search", &params).await?;
        Ok(list.products)
    }

    async fn products_by_category(&self, category: &str, limit: u32) -> ApiResult<Vec<Product>> {
        let params = [("category", category.to_string()), ("limit", limit.to_string())];
        let list: ProductList = self.get("/products/search", &params).await?;
        Ok(list.products)
    }

    async fn related_products(&self, id: &str, limit: u32) -> ApiResult<Vec<Product>> {
        let params = [("limit", limit.to_string())];
        let list: ProductList = self
            .get(&format!("/products/{}/related", id), &params)
            .await?;
        Ok(list.products)
    }

    async fn create_product(&self, draft: &ProductDraft) -> ApiResult<Product> {
        self.post("/admin/products", draft).await
    }

    async fn update_product(&self, id: &str, draft: &ProductDraft) -> ApiResult<Product> {
        self.put(&format!("/admin/products/{}", id), draft).await
    }

    async fn delete_product(&self, id: &str) -> ApiResult<()> {
        let _: IgnoredAny = self.delete(&format!("/admin/products/{}", id)).await?;
        Ok(())
    }
}

#[async_trait]
impl InteractionsApi for ApiClient {
    async fn record(&self, kind: InteractionKind, product_id: &str) -> ApiResult<()> {
        let path = format!("/interactions/{}", kind.as_str());
        let _: IgnoredAny = self.post(&path, &InteractionBody { product_id }).await?;
        Ok(())
    }

    async fn record_purchase(&self, purchase: &PurchaseRecord) -> ApiResult<()> {
        let _: IgnoredAny = self.post("/interactions/purchase", purchase).await?;
        Ok(())
    }

    async fn history(&self) -> ApiResult<Vec<Purchase>> {
        let history: PurchaseHistory = self.get("/users/history", &[]).await?;
        Ok(history.purchases)
    }
}

#[async_trait]
impl RecommendationsApi for ApiClient {
    async fn recommendations(
        &self,
        algorithm: RecommendationAlgorithm,
        limit: u32,
    ) -> ApiResult<Recommendation> {
        let params = [("limit", limit.to_string())];
        self.get(algorithm.path(), &params).await
    }
}
