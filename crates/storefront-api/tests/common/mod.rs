//! Shared fixtures for client tests.

#![allow(dead_code)]

pub mod mock_backend;

use std::sync::Arc;
use std::time::Duration;

use storefront_api::{ApiClient, ApiConfig};
use storefront_storage::MemoryStorage;

use mock_backend::MockBackend;

/// Client pointed at `backend`, plus the storage it reads the token from.
pub fn client_for(backend: &MockBackend) -> (ApiClient, Arc<MemoryStorage>) {
    client_with_timeout(&backend.base_url(), Duration::from_secs(5))
}

pub fn client_with_timeout(base_url: &str, timeout: Duration) -> (ApiClient, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let config = ApiConfig::new(base_url).unwrap().timeout(timeout);
    let client = ApiClient::new(&config, storage.clone()).unwrap();
    (client, storage)
}

pub const LAPTOP_JSON: &str = r#"{
    "id": "p1",
    "name": "Laptop",
    "description": "Thin and light",
    "category": "Electronics",
    "price": 999.99,
    "stock": 4,
    "tags": ["computer"],
    "rating": 4.5,
    "reviewCount": 10
}"#;

pub const SESSION_JSON: &str = r#"{
    "user": {
        "id": "u1",
        "username": "jdoe",
        "email": "jdoe@example.com",
        "firstName": "Jane",
        "lastName": "Doe",
        "preferences": {"categories": null, "priceRange": {"min": 0, "max": 0}},
        "createdAt": "2024-01-05T10:00:00Z"
    },
    "token": "jwt-abc"
}"#;
