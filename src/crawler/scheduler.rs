//! Round-based fetch scheduler with bounded retry
//!
//! This module handles:
//! - Fetching a batch of URLs concurrently, one round at a time
//! - Retrying failed URLs in later rounds, up to a fixed round budget
//! - Keeping every successful fetch, whatever happens to the rest
//! - Reporting URLs dropped once the budget is spent
//!
//! A round is atomic: every request dispatched in it settles before the
//! pending list is touched.

use crate::crawler::fetcher::PageFetcher;
use crate::state::{DroppedUrl, FetchOutcome, PageContent};
use crate::NetworkError;
use futures::stream::{self, StreamExt};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Result of fetching a batch of URLs
#[derive(Debug, Default)]
pub struct FetchReport {
    /// Fetched pages, in the order their rounds settled
    pub pages: Vec<PageContent>,

    /// URLs still failing after the last round
    pub dropped: Vec<DroppedUrl>,

    /// Number of rounds actually run
    pub rounds: u32,
}

/// Scheduler fetching URL batches with a fixed retry budget
///
/// Each round dispatches one request per pending URL. By default every
/// pending URL is requested at once, which is how the site has always been
/// crawled but can hammer it on large topics; `max_in_flight` caps this.
pub struct FetchScheduler {
    fetcher: Arc<dyn PageFetcher>,

    /// Maximum rounds per batch (at least 1)
    max_rounds: u32,

    /// Maximum concurrent requests within a round (None = uncapped)
    max_in_flight: Option<usize>,
}

impl FetchScheduler {
    /// Creates a new scheduler
    ///
    /// # Arguments
    ///
    /// * `fetcher` - The page fetcher shared by every round
    /// * `max_rounds` - Round budget per batch; 0 is treated as 1
    /// * `max_in_flight` - Optional cap on concurrent requests per round
    pub fn new(fetcher: Arc<dyn PageFetcher>, max_rounds: u32, max_in_flight: Option<usize>) -> Self {
        Self {
            fetcher,
            max_rounds: max_rounds.max(1),
            max_in_flight: max_in_flight.map(|n| n.max(1)),
        }
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// Fetches a single URL once, without retry
    pub async fn fetch_once(&self, url: &str) -> Result<PageContent, NetworkError> {
        let body = self.fetcher.fetch(url).await?;
        Ok(PageContent::new(url, body))
    }

    /// Fetches every URL, retrying failures for up to `max_rounds` rounds
    ///
    /// A URL failing in every round is requested exactly `max_rounds` times
    /// and reported in [`FetchReport::dropped`] with its last failure.
    pub async fn fetch_all(&self, urls: Vec<String>) -> FetchReport {
        let mut pending = urls;
        let mut report = FetchReport::default();
        let mut last_failures: HashMap<String, NetworkError> = HashMap::new();

        while !pending.is_empty() && report.rounds < self.max_rounds {
            report.rounds += 1;
            tracing::info!(
                "Round {}/{}: retrieving {} additional page(s)",
                report.rounds,
                self.max_rounds,
                pending.len()
            );

            let outcomes = self.run_round(&pending).await;

            let mut fetched = HashSet::new();
            for (url, outcome) in outcomes {
                match outcome {
                    FetchOutcome::Success(page) => {
                        tracing::debug!("Retrieved {}", url);
                        last_failures.remove(&url);
                        fetched.insert(url);
                        report.pages.push(page);
                    }
                    FetchOutcome::Failure(error) => {
                        tracing::warn!(
                            url = %url,
                            status = ?error.status,
                            "FAILED retrieving page: {}",
                            error
                        );
                        last_failures.insert(url, error);
                    }
                }
            }

            pending.retain(|url| !fetched.contains(url));
        }

        report.dropped = pending
            .into_iter()
            .map(|url| {
                let reason = last_failures
                    .get(&url)
                    .cloned()
                    .unwrap_or_else(|| NetworkError::transport(url.as_str(), "Never attempted"));
                tracing::warn!(
                    "Dropping {} after {} round(s): {}",
                    url,
                    report.rounds,
                    reason
                );
                DroppedUrl { url, reason }
            })
            .collect();

        report
    }

    /// Dispatches one request per pending URL and waits for all of them
    ///
    /// Outcomes come back in completion order, each tagged with its URL.
    async fn run_round(&self, pending: &[String]) -> Vec<(String, FetchOutcome)> {
        let limit = self.max_in_flight.unwrap_or(pending.len()).max(1);

        stream::iter(pending.iter().cloned())
            .map(|url| async move {
                let outcome = match self.fetcher.fetch(&url).await {
                    Ok(body) => FetchOutcome::Success(PageContent::new(url.as_str(), body)),
                    Err(error) => FetchOutcome::Failure(error),
                };
                (url, outcome)
            })
            .buffer_unordered(limit)
            .collect()
            .await
    }
}
