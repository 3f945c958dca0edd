//! Statistics gathered over a crawl run

use chrono::{DateTime, Utc};

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Topics found on the index page
    pub topics_discovered: usize,

    /// Topics whose pages were scanned
    pub topics_crawled: usize,

    /// Topics abandoned because their front page could not be fetched
    pub topics_skipped: usize,

    /// Pages fetched, front pages included
    pub pages_fetched: usize,

    /// Sub-page URLs given up on after the last fetch round
    pub dropped_urls: Vec<String>,

    /// Records extracted
    pub records: usize,
}

impl CrawlStatistics {
    /// Starts the clock on a new run
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            topics_discovered: 0,
            topics_crawled: 0,
            topics_skipped: 0,
            pages_fetched: 0,
            dropped_urls: Vec::new(),
            records: 0,
        }
    }

    /// Marks the run finished
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Run duration, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    /// Share of attempted pages that were fetched, as a percentage
    pub fn fetch_success_rate(&self) -> f64 {
        let attempted = self.pages_fetched + self.dropped_urls.len() + self.topics_skipped;
        if attempted == 0 {
            return 0.0;
        }
        (self.pages_fetched as f64 / attempted as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Run:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    if let Some(finished) = stats.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    if let Some(seconds) = stats.duration_seconds() {
        println!("  Duration: {}s", seconds);
    }
    println!();

    println!("Topics:");
    println!("  Discovered: {}", stats.topics_discovered);
    println!("  Crawled: {}", stats.topics_crawled);
    println!("  Skipped: {}", stats.topics_skipped);
    println!();

    println!("Pages:");
    println!("  Fetched: {}", stats.pages_fetched);
    println!("  Dropped: {}", stats.dropped_urls.len());
    for url in &stats.dropped_urls {
        println!("    - {}", url);
    }
    println!();

    println!("Records: {}", stats.records);
    println!("Fetch Success Rate: {:.1}%", stats.fetch_success_rate());
}
