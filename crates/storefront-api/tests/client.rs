//! ApiClient behaviour against a mock backend.

mod common;

use std::time::Duration;

use common::mock_backend::{MockBackend, MockResponse};
use common::{client_for, client_with_timeout, LAPTOP_JSON, SESSION_JSON};
use storefront_api::{
    ApiError, AuthApi, CatalogApi, InteractionsApi, RecommendationsApi, NETWORK_MESSAGE,
};
use storefront_core::{
    Credentials, InteractionKind, Money, PurchaseItem, PurchaseRecord, PurchaseStatus,
    RecommendationAlgorithm,
};
use storefront_storage::{keys, Storage};

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_list_products_unwraps_envelope_and_sends_paging() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::json(&format!(r#"{{"products": [{}]}}"#, LAPTOP_JSON)))
        .await;
    let (api, _) = client_for(&backend);

    let products = api.list_products(20, 40).await.unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].price, Money::from_cents(99999));

    let req = backend.last_request().await;
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/api/v1/products");
    assert_eq!(req.query, "limit=20&offset=40");
}

#[tokio::test]
async fn test_missing_or_null_product_list_is_empty() {
    let backend = MockBackend::start().await;
    backend.enqueue(MockResponse::json("{}")).await;
    backend.enqueue(MockResponse::json(r#"{"products": null}"#)).await;
    let (api, _) = client_for(&backend);

    assert!(api.search_products("laptop", "", 20).await.unwrap().is_empty());
    assert!(api.related_products("p1", 5).await.unwrap().is_empty());

    let requests = backend.requests().await;
    assert_eq!(requests[0].path, "/api/v1/products/search");
    assert_eq!(requests[0].query, "q=laptop&category=&limit=20");
    assert_eq!(requests[1].path, "/api/v1/products/p1/related");
    assert_eq!(requests[1].query, "limit=5");
}

#[tokio::test]
async fn test_category_listing_uses_search_endpoint() {
    let backend = MockBackend::start().await;
    backend.enqueue(MockResponse::json(r#"{"products": []}"#)).await;
    let (api, _) = client_for(&backend);

    api.products_by_category("Home & Garden", 20).await.unwrap();

    let req = backend.last_request().await;
    assert_eq!(req.path, "/api/v1/products/search");
    assert_eq!(req.query, "category=Home+%26+Garden&limit=20");
}

#[tokio::test]
async fn test_delete_product_accepts_empty_body() {
    let backend = MockBackend::start().await;
    backend.enqueue(MockResponse::empty(204)).await;
    let (api, _) = client_for(&backend);

    api.delete_product("p1").await.unwrap();

    let req = backend.last_request().await;
    assert_eq!(req.method, "DELETE");
    assert_eq!(req.path, "/api/v1/admin/products/p1");
}

// =============================================================================
// Auth & Headers
// =============================================================================

#[tokio::test]
async fn test_login_posts_credentials_and_decodes_session() {
    let backend = MockBackend::start().await;
    backend.enqueue(MockResponse::json(SESSION_JSON)).await;
    let (api, _) = client_for(&backend);

    let session = api
        .login(&Credentials {
            email: "jdoe@example.com".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(session.token, "jwt-abc");
    assert_eq!(session.user.first_name, "Jane");
    assert!(session.user.preferences.categories.is_empty());

    let req = backend.last_request().await;
    assert_eq!(req.path, "/api/v1/auth/login");
    assert_eq!(req.json()["email"], "jdoe@example.com");
    assert_eq!(req.header("authorization"), None);
}

#[tokio::test]
async fn test_stored_token_is_sent_as_bearer() {
    let backend = MockBackend::start().await;
    backend.enqueue(MockResponse::json(LAPTOP_JSON)).await;
    let (api, storage) = client_for(&backend);
    storage.set(keys::TOKEN, "jwt-abc").unwrap();

    api.get_product("p1").await.unwrap();

    let req = backend.last_request().await;
    assert_eq!(req.header("authorization"), Some("Bearer jwt-abc"));
    let request_id = req.header("x-request-id").unwrap();
    assert_eq!(request_id.len(), 36);
}

#[tokio::test]
async fn test_unauthorized_clears_stored_session() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::status(401, r#"{"error": "Token expired"}"#))
        .await;
    let (api, storage) = client_for(&backend);
    storage.set(keys::TOKEN, "stale").unwrap();
    storage.set(keys::USER, "{}").unwrap();

    let err = api.history().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Token expired");
    assert_eq!(storage.get(keys::TOKEN).unwrap(), None);
    assert_eq!(storage.get(keys::USER).unwrap(), None);
}

#[tokio::test]
async fn test_rejected_login_keeps_stored_session() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::status(401, r#"{"error": "Invalid credentials"}"#))
        .await;
    let (api, storage) = client_for(&backend);
    storage.set(keys::TOKEN, "jwt-abc").unwrap();
    storage.set(keys::USER, r#"{"id": "u1"}"#).unwrap();

    let err = api
        .login(&Credentials {
            email: "jdoe@example.com".to_string(),
            password: "wrong-password".to_string(),
        })
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(backend.last_request().await.path, "/api/v1/auth/login");
    assert_eq!(storage.get(keys::TOKEN).unwrap().as_deref(), Some("jwt-abc"));
    assert_eq!(
        storage.get(keys::USER).unwrap().as_deref(),
        Some(r#"{"id": "u1"}"#)
    );
}

// =============================================================================
// Error Mapping
// =============================================================================

#[tokio::test]
async fn test_server_error_surfaces_message() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::status(500, r#"{"error": "database unavailable"}"#))
        .await;
    let (api, storage) = client_for(&backend);
    storage.set(keys::TOKEN, "jwt").unwrap();

    let err = api.list_products(20, 0).await.unwrap_err();

    assert!(matches!(err, ApiError::Server { status: 500, .. }));
    assert_eq!(err.to_string(), "database unavailable");
    // Only 401 clears the session
    assert_eq!(storage.get(keys::TOKEN).unwrap().as_deref(), Some("jwt"));
}

#[tokio::test]
async fn test_client_error_uses_message_field_then_fallback() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::status(404, r#"{"message": "Product not found"}"#))
        .await;
    backend.enqueue(MockResponse::status(403, "not json")).await;
    let (api, _) = client_for(&backend);

    let err = api.get_product("missing").await.unwrap_err();
    assert_eq!(err.status(), 404);
    assert_eq!(err.to_string(), "Product not found");

    let err = api.delete_product("p1").await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden { .. }));
    assert_eq!(err.to_string(), "An error occurred");
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    // Grab a free port, then close it so nothing is listening
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let (api, _) = client_with_timeout(
        &format!("http://127.0.0.1:{}/api/v1", port),
        Duration::from_secs(2),
    );

    let err = api.list_products(20, 0).await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.status(), 0);
    assert_eq!(err.to_string(), NETWORK_MESSAGE);
}

#[tokio::test]
async fn test_slow_response_times_out_as_network_error() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::json(LAPTOP_JSON).with_delay(1_000))
        .await;
    let (api, _) = client_with_timeout(&backend.base_url(), Duration::from_millis(100));

    let err = api.get_product("p1").await.unwrap_err();
    assert_eq!(err.status(), 0);
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::json(r#"{"id": "p1"}"#))
        .await;
    let (api, _) = client_for(&backend);

    let err = api.get_product("p1").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

// =============================================================================
// Interactions & Recommendations
// =============================================================================

#[tokio::test]
async fn test_record_interaction_posts_product_id() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::json(r#"{"message": "recorded"}"#))
        .await;
    let (api, _) = client_for(&backend);

    api.record(InteractionKind::Cart, "p1").await.unwrap();

    let req = backend.last_request().await;
    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/api/v1/interactions/cart");
    assert_eq!(req.json(), serde_json::json!({"productId": "p1"}));
}

#[tokio::test]
async fn test_record_purchase_sends_dollar_amounts() {
    let backend = MockBackend::start().await;
    backend.enqueue(MockResponse::json("{}")).await;
    let (api, _) = client_for(&backend);

    let record = PurchaseRecord {
        products: vec![PurchaseItem {
            product_id: "p1".to_string(),
            quantity: 2,
            price: Money::from_cents(1250),
        }],
        total: Money::from_cents(2500),
        status: PurchaseStatus::Completed,
    };
    api.record_purchase(&record).await.unwrap();

    let body = backend.last_request().await.json();
    assert_eq!(body["products"][0]["productId"], "p1");
    assert_eq!(body["products"][0]["price"], 12.5);
    assert_eq!(body["total"], 25.0);
    assert_eq!(body["status"], "completed");
}

#[tokio::test]
async fn test_history_unwraps_purchases() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::json(
            r#"{"purchases": [{"id": "h1", "products": [{"productID": "p1", "quantity": 1, "price": 5}], "total": 5, "status": "completed"}]}"#,
        ))
        .await;
    let (api, _) = client_for(&backend);

    let history = api.history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].total, Money::from_cents(500));
}

#[tokio::test]
async fn test_recommendations_route_per_algorithm() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::json(&format!(
            r#"{{"products": [{{"product": {}, "score": 0.9, "reason": "Because you liked Laptops"}}], "algorithm": "content-based"}}"#,
            LAPTOP_JSON
        )))
        .await;
    let (api, _) = client_for(&backend);

    let recs = api
        .recommendations(RecommendationAlgorithm::ContentBased, 10)
        .await
        .unwrap();

    assert_eq!(recs.products.len(), 1);
    assert_eq!(recs.products[0].product.name, "Laptop");

    let req = backend.last_request().await;
    assert_eq!(req.path, "/api/v1/recommendations/content-based");
    assert_eq!(req.query, "limit=10");
}
