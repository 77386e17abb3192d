//! # Client Configuration

use std::time::Duration;
use url::Url;

use crate::error::ApiResult;

/// Backend base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Per-request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`crate::ApiClient`].
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use storefront_api::ApiConfig;
///
/// let config = ApiConfig::new("https://shop.example.com/api/v1")
///     .unwrap()
///     .timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url.host_str(), Some("shop.example.com"));
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Prefix for every endpoint path, e.g. `http://host/api/v1`.
    pub base_url: Url,

    /// Whole-request timeout. Default: 10 seconds.
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> ApiResult<Self> {
        Ok(ApiConfig {
            base_url: Url::parse(base_url)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
