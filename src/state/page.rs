//! Fetched page content and per-URL fetch outcomes

use crate::NetworkError;

/// Raw body of a fetched page together with the URL it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub url: String,
    pub body: String,
}

impl PageContent {
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
        }
    }
}

/// Result of requesting one URL in a fetch round
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The page was fetched
    Success(PageContent),

    /// The request failed; the URL stays pending until the round budget runs out
    Failure(NetworkError),
}

/// A URL given up on after every fetch round failed
#[derive(Debug, Clone)]
pub struct DroppedUrl {
    pub url: String,

    /// The failure seen in the last round
    pub reason: NetworkError,
}
