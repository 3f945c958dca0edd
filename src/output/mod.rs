//! Output module for writing crawl results
//!
//! This module handles:
//! - Writing review records as pipe-delimited lines
//! - Recording and displaying crawl statistics

mod delimited;
pub mod stats;
mod traits;

pub use delimited::DelimitedWriter;
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{OutputError, OutputHandler, OutputResult};
