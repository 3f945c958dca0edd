//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties the components together:
//! - Fetching and parsing the topics index
//! - Crawling each topic in turn: front page, pagination, sub-pages
//! - Extracting review records from every fetched page
//! - Writing the aggregated records to the output file

use crate::config::{validate, Config};
use crate::crawler::aggregator::{Records, ResultAggregator};
use crate::crawler::extractor::RecordExtractor;
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::pagination::resolve_pagination;
use crate::crawler::scheduler::FetchScheduler;
use crate::crawler::selectors::SiteSelectors;
use crate::crawler::topics::discover_topics;
use crate::output::{CrawlStatistics, DelimitedWriter, OutputHandler};
use crate::state::{Topic, TopicStub};
use crate::CrawlError;
use std::path::Path;
use std::sync::Arc;

/// Everything a crawl run produced
#[derive(Debug)]
pub struct CrawlReport {
    /// The extracted records, in topic order
    pub records: Records,

    pub stats: CrawlStatistics,
}

/// Main crawler structure
///
/// The fetcher and compiled selectors are built once and shared by the
/// scheduler and extractor for the whole run.
pub struct Crawler {
    seed_url: String,
    selectors: Arc<SiteSelectors>,
    scheduler: FetchScheduler,
    extractor: RecordExtractor,
}

impl Crawler {
    /// Creates a crawler talking to the network over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Successfully created crawler
    /// * `Err(CrawlError)` - HTTP client or selector setup failed
    pub fn new(config: &Config) -> Result<Self, CrawlError> {
        let fetcher = HttpFetcher::from_config(&config.crawler, &config.http)?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Creates a crawler on top of the given fetcher
    pub fn with_fetcher(config: &Config, fetcher: Arc<dyn PageFetcher>) -> Result<Self, CrawlError> {
        let selectors = Arc::new(SiteSelectors::compile(&config.selectors)?);
        let scheduler = FetchScheduler::new(
            fetcher,
            config.crawler.max_rounds,
            config.crawler.max_in_flight.map(|n| n as usize),
        );
        let extractor = RecordExtractor::new(selectors.clone(), config.site.origin.clone());

        Ok(Self {
            seed_url: config.crawler.seed_url.clone(),
            selectors,
            scheduler,
            extractor,
        })
    }

    /// Runs a full crawl
    ///
    /// Fails only when the topics index cannot be fetched or contains no
    /// topics. Every other failure is logged and the crawl carries on with
    /// what it has.
    pub async fn crawl(&self) -> Result<CrawlReport, CrawlError> {
        let mut stats = CrawlStatistics::start();
        let mut aggregator = ResultAggregator::new();

        tracing::info!("Fetching topics index {}", self.seed_url);
        let index = self
            .scheduler
            .fetch_once(&self.seed_url)
            .await
            .map_err(|source| CrawlError::TopicsIndexFetch {
                url: self.seed_url.clone(),
                source,
            })?;

        let stubs = discover_topics(&index.body, &self.selectors).map_err(|message| {
            CrawlError::TopicsIndexParse {
                url: self.seed_url.clone(),
                message,
            }
        })?;
        stats.topics_discovered = stubs.len();
        tracing::info!("Discovered {} topics", stubs.len());

        for stub in stubs {
            self.crawl_topic(stub, &mut aggregator, &mut stats).await;
        }

        stats.records = aggregator.len();
        stats.finish();

        tracing::info!(
            "Crawl completed: {} records from {} pages, {} dropped",
            stats.records,
            stats.pages_fetched,
            stats.dropped_urls.len()
        );

        Ok(CrawlReport {
            records: aggregator.into_records(),
            stats,
        })
    }

    /// Crawls one topic: front page, its pagination, then every sub-page
    async fn crawl_topic(
        &self,
        stub: TopicStub,
        aggregator: &mut ResultAggregator,
        stats: &mut CrawlStatistics,
    ) {
        let mut topic = Topic::new(stub);
        tracing::info!("{}", topic.name());
        tracing::info!("   Retrieving page 1 ...");

        let front = match self.scheduler.fetch_once(&topic.stub.front_url).await {
            Ok(front) => front,
            Err(e) => {
                tracing::warn!("Skipping topic '{}': front page failed: {}", topic.name(), e);
                stats.topics_skipped += 1;
                return;
            }
        };
        stats.pages_fetched += 1;

        let sub_pages = resolve_pagination(&front.body, &self.selectors);
        topic.resolve_front_page(front, sub_pages);

        let pending = topic.take_pending();
        if !pending.is_empty() {
            let report = self.scheduler.fetch_all(pending).await;
            stats.pages_fetched += report.pages.len();
            stats
                .dropped_urls
                .extend(report.dropped.into_iter().map(|d| d.url));
            topic.add_pages(report.pages);
        }

        let name = topic.name().to_string();
        let pages = topic.into_pages();
        tracing::info!("   Scanning {} page(s) in total", pages.len());

        for (i, page) in pages.iter().enumerate() {
            let records = self.extractor.extract(&name, page);
            tracing::debug!("   Page {}: {} review(s)", i + 1, records.len());
            aggregator.push_page(records);
        }

        stats.topics_crawled += 1;
    }
}

/// Runs the main crawl operation and writes the results
///
/// This function orchestrates the entire crawl process:
///
/// 1. Validate the configuration, build the HTTP client and compile selectors
/// 2. Fetch and parse the topics index
/// 3. Crawl each topic in discovery order
/// 4. Write one pipe-delimited line per record to the configured output path
///
/// # Example
///
/// ```no_run
/// use cochrane_crawler::config::Config;
/// use cochrane_crawler::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let stats = run_crawl(Config::default()).await?;
/// println!("{} records", stats.records);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlStatistics, CrawlError> {
    validate(&config)?;
    let crawler = Crawler::new(&config)?;
    let report = crawler.crawl().await?;

    let mut writer = DelimitedWriter::create(Path::new(&config.output.path))?;
    let written = writer.write_records(report.records)?;
    writer.finish()?;
    tracing::info!("Wrote {} records to {}", written, config.output.path);

    Ok(report.stats)
}
