//! HTTP client for the TVmaze catalog API
//!
//! Issues a single GET per call and decodes the JSON body. Failures are
//! returned as-is: there is no retry and no fallback result. Timeouts are
//! left to the transport configuration.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::url::{DEFAULT_BASE_URL, normalize_base};

const USER_AGENT: &str = concat!("tvmaze-core/", env!("CARGO_PKG_VERSION"));

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (default: "http://api.tvmaze.com/")
    pub base_url: String,
    /// Request timeout in seconds, enforced by the transport (default: 30)
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Default configuration pointed at another base URL (e.g., a mock server)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// HTTP client wrapper for the catalog API
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// - `InvalidUrl` if `base_url` is not an absolute http(s) URL
    /// - `Http` if the underlying `reqwest::Client` cannot be built
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let base_url = normalize_base(&config.base_url);
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CatalogError::InvalidUrl(config.base_url));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent)
            .build()
            .map_err(CatalogError::Http)?;

        Ok(Self { client, base_url })
    }

    /// Base URL every request is built against, always ending in `/`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a URL and decode its JSON body into `T`
    ///
    /// # Arguments
    /// * `url` - Absolute URL to fetch
    /// * `context` - Short description used in decode errors (e.g., "search results")
    ///
    /// # Errors
    /// - `Http` - transport failure
    /// - `HttpStatus` - any non-2xx status
    /// - `Decode` - body is not the expected JSON shape
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, context: &str) -> Result<T> {
        debug!(%url, "catalog request");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(CatalogError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await.map_err(CatalogError::Http)?;
        serde_json::from_slice(&body).map_err(|e| CatalogError::Decode {
            context: context.to_string(),
            message: e.to_string(),
        })
    }
}
