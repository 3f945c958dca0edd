//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the browser-like headers the site expects
//! - GET requests to fetch page content
//! - Error classification into [`NetworkError`]
//!
//! Retrying is not done here; see the scheduler.

use crate::config::{CrawlerConfig, HttpConfig};
use crate::NetworkError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::time::Duration;

/// Capability to retrieve a page body by URL
///
/// The crawler only ever talks to the network through this trait, which keeps
/// the orchestration logic testable against in-memory fetchers.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url`, returning its body or the reason it could not be fetched
    async fn fetch(&self, url: &str) -> Result<String, NetworkError>;
}

/// [`PageFetcher`] backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher from crawler and HTTP settings
    pub fn from_config(crawler: &CrawlerConfig, http: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(crawler, http)?))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, NetworkError> {
        fetch_url(&self.client, url).await
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `crawler` - Timeout settings
/// * `http` - User agent, extra headers and cookie policy
///
/// # Example
///
/// ```no_run
/// use cochrane_crawler::config::Config;
/// use cochrane_crawler::crawler::build_http_client;
///
/// let config = Config::default();
/// let client = build_http_client(&config.crawler, &config.http).unwrap();
/// ```
pub fn build_http_client(
    crawler: &CrawlerConfig,
    http: &HttpConfig,
) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    for (name, value) in &http.headers {
        // Validation rejects bad headers up front; skip rather than fail here.
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::warn!("Ignoring invalid header {}", name),
        }
    }

    Client::builder()
        .user_agent(http.user_agent.as_str())
        .default_headers(headers)
        .cookie_store(http.cookies)
        .timeout(Duration::from_secs(crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(crawler.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies any failure
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | body |
/// | any other status | `NetworkError` with status |
/// | timeout | `NetworkError`, no status |
/// | connection failure | `NetworkError`, no status |
/// | body read failure | `NetworkError` with status |
pub async fn fetch_url(client: &Client, url: &str) -> Result<String, NetworkError> {
    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            NetworkError::transport(url, "Request timeout")
        } else if e.is_connect() {
            NetworkError::transport(url, "Connection refused")
        } else {
            NetworkError::transport(url, e.to_string())
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(NetworkError::status(url, status.as_u16()));
    }

    response.text().await.map_err(|e| NetworkError {
        url: url.to_string(),
        status: Some(status.as_u16()),
        message: format!("Failed to read body: {}", e),
    })
}
