use serde::Deserialize;
use std::collections::BTreeMap;

/// Landing page of the Cochrane Library "Browse by Topic" listing
pub const DEFAULT_SEED_URL: &str =
    "https://www.cochranelibrary.com/home/topic-and-review-group-list.html?page=topic";

/// Prefix concatenated onto every review href
pub const DEFAULT_SITE_ORIGIN: &str = "https://www.cochranelibrary.com/";

/// Default number of fetch rounds per topic
pub const DEFAULT_MAX_ROUNDS: u32 = 3;

/// Main configuration structure for the crawler
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// URL of the topics index page
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Number of fetch rounds granted to a topic's sub-pages
    #[serde(rename = "max-rounds")]
    pub max_rounds: u32,

    /// Maximum concurrent requests within a round (unset = every pending URL at once)
    #[serde(rename = "max-in-flight")]
    pub max_in_flight: Option<u32>,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            seed_url: DEFAULT_SEED_URL.to_string(),
            max_rounds: DEFAULT_MAX_ROUNDS,
            max_in_flight: None,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Literal prefix for review URLs
    pub origin: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_SITE_ORIGIN.to_string(),
        }
    }
}

/// CSS selectors tied to the target site's markup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    #[serde(rename = "topic-item")]
    pub topic_item: String,

    #[serde(rename = "topic-link")]
    pub topic_link: String,

    #[serde(rename = "topic-name")]
    pub topic_name: String,

    #[serde(rename = "pagination-item")]
    pub pagination_item: String,

    #[serde(rename = "pagination-link")]
    pub pagination_link: String,

    /// Class marking the pagination item of the page being viewed
    #[serde(rename = "active-class")]
    pub active_class: String,

    #[serde(rename = "review-item")]
    pub review_item: String,

    #[serde(rename = "review-title-link")]
    pub review_title_link: String,

    pub authors: String,

    #[serde(rename = "metadata-block")]
    pub metadata_block: String,

    /// Looked up inside the metadata block
    pub date: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            topic_item: ".browse-by-list-item".to_string(),
            topic_link: "a".to_string(),
            topic_name: "button".to_string(),
            pagination_item: "ul.pagination-page-list li.pagination-page-list-item".to_string(),
            pagination_link: "a".to_string(),
            active_class: "active".to_string(),
            review_item: ".search-results-item".to_string(),
            review_title_link: ".search-results-item-body h3.result-title a".to_string(),
            authors: ".search-result-authors div".to_string(),
            metadata_block: ".search-result-metadata-block".to_string(),
            date: ".search-result-date div".to_string(),
        }
    }
}

/// Request identification and header configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Keep cookies set by the site between requests
    pub cookies: bool,

    /// Extra headers sent with every request
    pub headers: BTreeMap<String, String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        // The site refuses plain clients; mimic a desktop browser.
        let headers = [
            (
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
            ),
            ("Accept-Language", "en-US,en;q=0.5"),
            ("Upgrade-Insecure-Requests", "1"),
            ("Sec-Fetch-Dest", "document"),
            ("Sec-Fetch-Mode", "navigate"),
            ("Sec-Fetch-Site", "none"),
            ("Sec-Fetch-User", "?1"),
            ("Priority", "u=1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            user_agent:
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:126.0) Gecko/20100101 Firefox/126.0"
                    .to_string(),
            cookies: true,
            headers,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the pipe-delimited review file
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "cochrane_reviews.txt".to_string(),
        }
    }
}
