//! Cochrane-Crawler: a review index harvester
//!
//! This crate crawls the Cochrane Library topic index, follows each topic's
//! paginated review listing and extracts bibliographic records (title, URL,
//! authors, publication date) for every review it finds.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for crawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to fetch topics index page {url}: {source}")]
    TopicsIndexFetch { url: String, source: NetworkError },

    #[error("Failed to parse topics index page {url}: {message}")]
    TopicsIndexParse { url: String, message: String },

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// A single failed page request
///
/// Transient by nature: the scheduler retries these until its round budget is
/// spent.
#[derive(Debug, Clone, Error)]
#[error("{message}{}", status_suffix(.status))]
pub struct NetworkError {
    /// The URL that was requested
    pub url: String,

    /// HTTP status code, when the server answered at all
    pub status: Option<u16>,

    /// Error description
    pub message: String,
}

impl NetworkError {
    /// Creates a failure for a response that carried a non-success status
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self {
            url: url.into(),
            status: Some(status),
            message: "Unexpected response status".to_string(),
        }
    }

    /// Creates a failure for a request that never produced a response
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: None,
            message: message.into(),
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default()
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),
}

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, Crawler, Records};
pub use state::{FetchOutcome, ReviewRecord, TopicStub};
