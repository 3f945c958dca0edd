//! Crawler module for topic and review harvesting
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageFetcher` capability
//! - Topic discovery and pagination resolution
//! - Round-based concurrent fetching with bounded retry
//! - Review record extraction and aggregation
//! - Overall crawl coordination

mod aggregator;
mod coordinator;
mod extractor;
mod fetcher;
mod pagination;
mod scheduler;
mod selectors;
mod topics;

pub use aggregator::{Records, ResultAggregator};
pub use coordinator::{run_crawl, CrawlReport, Crawler};
pub use extractor::RecordExtractor;
pub use fetcher::{build_http_client, fetch_url, HttpFetcher, PageFetcher};
pub use pagination::resolve_pagination;
pub use scheduler::{FetchReport, FetchScheduler};
pub use selectors::SiteSelectors;
pub use topics::discover_topics;
