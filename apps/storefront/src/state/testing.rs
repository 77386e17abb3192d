//! Scripted endpoint fakes shared by the slice and façade tests.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use storefront_api::{
    ApiError, ApiResult, AuthApi, CatalogApi, InteractionsApi, RecommendationsApi,
};
use storefront_core::{
    AuthSession, Credentials, InteractionKind, Money, Product, ProductDraft, Purchase,
    PurchaseRecord, Recommendation, RecommendationAlgorithm, RegisterRequest, User,
    UserPreferences,
};

pub fn user(email: &str) -> User {
    User {
        id: format!("u-{}", email),
        username: "jdoe".to_string(),
        email: email.to_string(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        preferences: UserPreferences::default(),
        created_at: None,
    }
}

pub fn session(email: &str, token: &str) -> AuthSession {
    AuthSession {
        user: user(email),
        token: token.to_string(),
    }
}

pub fn product(id: &str, price_cents: i64) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {}", id),
        description: "A product".to_string(),
        category: "Electronics".to_string(),
        price: Money::from_cents(price_cents),
        stock: 10,
        image_url: None,
        tags: Vec::new(),
        rating: 4.0,
        review_count: 3,
    }
}

fn not_found() -> ApiError {
    ApiError::from_status(404, br#"{"error": "Product not found"}"#)
}

/// Every endpoint group, answering from scripted queues.
///
/// Empty queues fall back to a harmless success, except auth and single
/// product lookups which fail.
#[derive(Default)]
pub struct FakeApi {
    pub login_results: Mutex<VecDeque<ApiResult<AuthSession>>>,
    pub register_results: Mutex<VecDeque<ApiResult<AuthSession>>>,
    pub list_results: Mutex<VecDeque<ApiResult<Vec<Product>>>>,
    pub product_results: Mutex<VecDeque<ApiResult<Product>>>,
    pub purchase_results: Mutex<VecDeque<ApiResult<()>>>,
    pub interaction_results: Mutex<VecDeque<ApiResult<()>>>,
    pub recommendation_results: Mutex<VecDeque<ApiResult<Recommendation>>>,
    pub history_results: Mutex<VecDeque<ApiResult<Vec<Purchase>>>>,
    /// Artificial latency per search query.
    pub search_delays: Mutex<HashMap<String, Duration>>,
    /// Artificial latency before a purchase is answered.
    pub purchase_delay: Mutex<Option<Duration>>,
    /// Artificial latency before a login is answered.
    pub login_delay: Mutex<Option<Duration>>,
    /// Every call, in order, e.g. `"record:cart:p1"`.
    pub calls: Mutex<Vec<String>>,
    pub purchases: Mutex<Vec<PurchaseRecord>>,
}

impl FakeApi {
    fn log(&self, call: String) {
        self.calls.lock().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    fn next_list(&self) -> ApiResult<Vec<Product>> {
        self.list_results.lock().pop_front().unwrap_or(Ok(Vec::new()))
    }

    fn next_product(&self) -> ApiResult<Product> {
        self.product_results
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(not_found()))
    }
}

#[async_trait]
impl AuthApi for FakeApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthSession> {
        self.log(format!("login:{}", credentials.email));
        let delay = *self.login_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.login_results
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::from_status(500, b"")))
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthSession> {
        self.log(format!("register:{}", request.email));
        self.register_results
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::from_status(500, b"")))
    }
}

#[async_trait]
impl CatalogApi for FakeApi {
    async fn list_products(&self, limit: u32, offset: u32) -> ApiResult<Vec<Product>> {
        self.log(format!("list:{}:{}", limit, offset));
        self.next_list()
    }

    async fn get_product(&self, id: &str) -> ApiResult<Product> {
        self.log(format!("get:{}", id));
        self.next_product()
    }

    /// Answers with one product whose id is the query, after the query's
    /// scripted delay. The query `"fail"` yields a server error.
    async fn search_products(
        &self,
        query: &str,
        category: &str,
        limit: u32,
    ) -> ApiResult<Vec<Product>> {
        self.log(format!("search:{}:{}:{}", query, category, limit));
        let delay = self.search_delays.lock().get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if query == "fail" {
            return Err(ApiError::from_status(500, b""));
        }
        Ok(vec![product(query, 100)])
    }

    async fn products_by_category(&self, category: &str, limit: u32) -> ApiResult<Vec<Product>> {
        self.log(format!("category:{}:{}", category, limit));
        self.next_list()
    }

    async fn related_products(&self, id: &str, limit: u32) -> ApiResult<Vec<Product>> {
        self.log(format!("related:{}:{}", id, limit));
        self.next_list()
    }

    async fn create_product(&self, draft: &ProductDraft) -> ApiResult<Product> {
        self.log(format!("create:{}", draft.name));
        self.next_product()
    }

    async fn update_product(&self, id: &str, draft: &ProductDraft) -> ApiResult<Product> {
        self.log(format!("update:{}:{}", id, draft.name));
        self.next_product()
    }

    async fn delete_product(&self, id: &str) -> ApiResult<()> {
        self.log(format!("delete:{}", id));
        Ok(())
    }
}

#[async_trait]
impl InteractionsApi for FakeApi {
    async fn record(&self, kind: InteractionKind, product_id: &str) -> ApiResult<()> {
        self.log(format!("record:{}:{}", kind, product_id));
        self.interaction_results.lock().pop_front().unwrap_or(Ok(()))
    }

    async fn record_purchase(&self, purchase: &PurchaseRecord) -> ApiResult<()> {
        self.log("purchase".to_string());
        self.purchases.lock().push(purchase.clone());
        let delay = *self.purchase_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.purchase_results.lock().pop_front().unwrap_or(Ok(()))
    }

    async fn history(&self) -> ApiResult<Vec<Purchase>> {
        self.log("history".to_string());
        self.history_results
            .lock()
            .pop_front()
            .unwrap_or(Ok(Vec::new()))
    }
}

#[async_trait]
impl RecommendationsApi for FakeApi {
    async fn recommendations(
        &self,
        algorithm: RecommendationAlgorithm,
        limit: u32,
    ) -> ApiResult<Recommendation> {
        self.log(format!("recommendations:{}:{}", algorithm.path(), limit));
        self.recommendation_results
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(Recommendation::default()))
    }
}
