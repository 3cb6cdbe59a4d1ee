//! Upstream fetcher for the weather provider.
//!
//! A fetch either yields the provider's parsed JSON document or nothing at all.
//! Connection errors, timeouts, non-2xx statuses, undecodable bodies and
//! documents that are not a non-empty JSON object are logged here and
//! collapsed into `None`; callers never see transport detail.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, warn};

use super::common::USER_AGENT;

/// Source of upstream weather documents.
#[async_trait::async_trait]
pub trait WeatherFetcher: Send + Sync {
    /// Perform one GET request against `url`, bounded by `timeout`.
    ///
    /// Returns `None` when no usable document could be obtained.
    async fn fetch(&self, url: &str, timeout: Duration) -> Option<Value>;
}

/// HTTP implementation of [`WeatherFetcher`] backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher that identifies itself with the fixed user agent.
    pub fn new() -> reqwest::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    async fn request(&self, url: &str) -> reqwest::Result<Value> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[async_trait::async_trait]
impl WeatherFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Option<Value> {
        debug!("Fetching upstream document: {}", url);

        // The request future owns the connection; dropping it on timeout closes it.
        match tokio::time::timeout(timeout, self.request(url)).await {
            Ok(Ok(Value::Object(document))) if !document.is_empty() => {
                Some(Value::Object(document))
            }
            Ok(Ok(document)) => {
                warn!("Upstream returned an empty or non-object document: {}", document);
                None
            }
            Ok(Err(e)) => {
                warn!("Upstream request failed: {}", e);
                None
            }
            Err(_) => {
                warn!("Upstream request timed out after {:?}", timeout);
                None
            }
        }
    }
}
