//! # HTTP Client
//!
//! ## Request Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  endpoint method (CatalogApi::get_product, ...)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  request()  ── base_url + path                                          │
//! │             ── X-Request-Id: <uuid v4>                                  │
//! │             ── Authorization: Bearer <token from storage>, if any       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  send()     ── no response        → ApiError::Network                   │
//! │             ── 2xx                → decode JSON body                    │
//! │             ── 401                → forget token + user, Unauthorized   │
//! │                                     (kept when /auth/* rejects a login) │
//! │             ── 5xx                → error! log, Server                  │
//! │             ── other              → Forbidden / Request                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The token is read from storage on every request, so a login or logout
//! elsewhere in the process takes effect on the next call without touching
//! the client.

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, warn};
use url::Url;
use uuid::Uuid;

use storefront_storage::{keys, Storage, StorageExt};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};

/// Correlation header attached to every request.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Endpoints that exchange credentials for a session. A 401 from these
/// means bad credentials, not a dead session.
const CREDENTIAL_PATHS: &[&str] = &["/auth/login", "/auth/register"];

fn is_credential_exchange(path: &str) -> bool {
    CREDENTIAL_PATHS.iter().any(|p| path.ends_with(p))
}

/// REST client for the storefront backend.
///
/// Cheap to clone; clones share the connection pool and storage.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    storage: Arc<dyn Storage>,
}

impl ApiClient {
    /// Creates a client. `storage` is where the bearer token is read from
    /// and where a rejected session is cleared.
    pub fn new(config: &ApiConfig, storage: Arc<dyn Storage>) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::Network)?;

        Ok(ApiClient {
            http,
            base_url: config.base_url.clone(),
            storage,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // =========================================================================
    // Verb Helpers
    // =========================================================================

    pub(crate) async fn get<T>(&self, path: &str, query: &[(&str, String)]) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let builder = self.request(Method::GET, path)?.query(query);
        self.send(builder).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path)?.json(body);
        self.send(builder).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PUT, path)?.json(body);
        self.send(builder).await
    }

    pub(crate) async fn delete<T>(&self, path: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let builder = self.request(Method::DELETE, path)?;
        self.send(builder).await
    }

    // =========================================================================
    // Pipeline
    // =========================================================================

    /// `path` is appended to the base URL verbatim (it keeps `/api/v1`).
    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{}{}", base, path))?)
    }

    fn token(&self) -> Option<String> {
        match self.storage.get(keys::TOKEN) {
            Ok(Some(token)) if !token.is_empty() => Some(token),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "Could not read stored token; sending unauthenticated");
                None
            }
        }
    }

    fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let url = self.endpoint(path)?;
        let mut builder = self
            .http
            .request(method, url)
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string());

        if let Some(token) = self.token() {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    async fn send<T>(&self, builder: RequestBuilder) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let request = builder.build().map_err(ApiError::Network)?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        debug!(%method, %path, %request_id, "API request");

        let response = self.http.execute(request).await.map_err(|e| {
            warn!(%method, %path, %request_id, error = %e, "No response from API");
            ApiError::Network(e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(ApiError::Network)?;
        debug!(%method, %path, %request_id, status = status.as_u16(), "API response");

        if status.is_success() {
            let raw: &[u8] = if body.is_empty() { b"null" } else { &body[..] };
            return serde_json::from_slice(raw).map_err(|e| {
                warn!(%path, %request_id, error = %e, "Undecodable API response");
                ApiError::Decode(e.to_string())
            });
        }

        let err = ApiError::from_status(status.as_u16(), &body);
        match status {
            StatusCode::UNAUTHORIZED if is_credential_exchange(&path) => {
                debug!(%path, %request_id, "Credentials rejected");
            }
            StatusCode::UNAUTHORIZED => {
                warn!(%path, %request_id, "Session rejected; clearing stored credentials");
                self.storage.forget(keys::TOKEN);
                self.storage.forget(keys::USER);
            }
            StatusCode::FORBIDDEN => {
                warn!(%path, %request_id, "Access forbidden");
            }
            s if s.is_server_error() => {
                error!(%method, %path, %request_id, status = s.as_u16(), error = %err, "Server error");
            }
            _ => {}
        }

        Err(err)
    }
}
