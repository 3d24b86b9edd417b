//! Document fetching.
//!
//! The resolver only needs "GET this URL, give me the body". `Fetcher`
//! is that seam; `HttpClient` is the reqwest-backed implementation used
//! outside of tests.

use crate::config::GraphConfig;
use crate::error::{FetchError, ResolveError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Retrieves the page body for an absolute URL.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP fetcher with a fixed user agent and request timeout.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Build a client from the graph configuration.
    pub fn new(config: &GraphConfig) -> Result<Self, ResolveError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ResolveError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpClient {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let request_error = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let resp = self.client.get(url).send().await.map_err(request_error)?;
        let status = resp.status();
        debug!(url, status = status.as_u16(), "fetched");
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        resp.text().await.map_err(request_error)
    }
}
