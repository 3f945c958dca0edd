//! Configuration module for the crawler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so an empty file (or no file at all) yields a
//! configuration that crawls the live Cochrane Library.
//!
//! # Example
//!
//! ```no_run
//! use cochrane_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Fetch rounds per topic: {}", config.crawler.max_rounds);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, HttpConfig, OutputConfig, SelectorConfig, SiteConfig,
    DEFAULT_MAX_ROUNDS, DEFAULT_SEED_URL, DEFAULT_SITE_ORIGIN,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
