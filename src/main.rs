//! Cochrane-Crawler main entry point
//!
//! This is the command-line interface for the review index harvester.

use anyhow::Context;
use clap::Parser;
use cochrane_crawler::config::{load_config_with_hash, validate, Config};
use cochrane_crawler::crawler::run_crawl;
use cochrane_crawler::output::print_statistics;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Cochrane-Crawler: a review index harvester
///
/// Crawls the Cochrane Library topic index, follows every topic's paginated
/// review listing and writes one `url|topic|title|authors|date` line per
/// review.
#[derive(Parser, Debug)]
#[command(name = "cochrane-crawler")]
#[command(version)]
#[command(about = "Harvests review metadata from the Cochrane Library", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Topics index URL to start from
    #[arg(long, value_name = "URL")]
    seed_url: Option<String>,

    /// File the records are written to
    #[arg(short, long, value_name = "PATH")]
    output: Option<String>,

    /// Fetch rounds per topic
    #[arg(long)]
    max_rounds: Option<u32>,

    /// Maximum concurrent requests per round
    #[arg(long)]
    max_in_flight: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };
    apply_overrides(&mut config, &cli);
    validate(&config).context("Invalid configuration")?;

    if cli.dry_run {
        print_dry_run(&config);
        return Ok(());
    }

    tracing::info!("Starting crawl at {}", config.crawler.seed_url);
    let stats = match run_crawl(config).await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    if !cli.quiet {
        print_statistics(&stats);
        println!("Done");
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("cochrane_crawler=info,warn"),
            1 => EnvFilter::new("cochrane_crawler=debug,info"),
            2 => EnvFilter::new("cochrane_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Command-line flags win over the configuration file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(seed_url) = &cli.seed_url {
        config.crawler.seed_url = seed_url.clone();
    }
    if let Some(output) = &cli.output {
        config.output.path = output.clone();
    }
    if let Some(max_rounds) = cli.max_rounds {
        config.crawler.max_rounds = max_rounds;
    }
    if let Some(max_in_flight) = cli.max_in_flight {
        config.crawler.max_in_flight = Some(max_in_flight);
    }
}

/// Handles the --dry-run mode: shows the effective configuration
fn print_dry_run(config: &Config) {
    println!("=== Cochrane-Crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed URL: {}", config.crawler.seed_url);
    println!("  Max rounds: {}", config.crawler.max_rounds);
    match config.crawler.max_in_flight {
        Some(n) => println!("  Max in flight: {}", n),
        None => println!("  Max in flight: unbounded"),
    }
    println!(
        "  Timeouts: {}s request, {}s connect",
        config.crawler.request_timeout_secs, config.crawler.connect_timeout_secs
    );

    println!("\nSite:");
    println!("  Origin: {}", config.site.origin);
    println!("  Topic items: {}", config.selectors.topic_item);
    println!("  Pagination items: {}", config.selectors.pagination_item);
    println!("  Review items: {}", config.selectors.review_item);

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Cookies: {}", config.http.cookies);
    for (name, value) in &config.http.headers {
        println!("  {}: {}", name, value);
    }

    println!("\nOutput:");
    println!("  Path: {}", config.output.path);

    println!("\n✓ Configuration is valid");
}
