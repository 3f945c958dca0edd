use crate::config::types::{
    Config, CrawlerConfig, HttpConfig, OutputConfig, SelectorConfig, SiteConfig,
};
use crate::ConfigError;
use reqwest::header::{HeaderName, HeaderValue};
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_site_config(&config.site)?;
    validate_selector_config(&config.selectors)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_http_url("seed-url", &config.seed_url)?;

    if config.max_rounds < 1 || config.max_rounds > 10 {
        return Err(ConfigError::Validation(format!(
            "max-rounds must be between 1 and 10, got {}",
            config.max_rounds
        )));
    }

    if config.max_in_flight == Some(0) {
        return Err(ConfigError::Validation(
            "max-in-flight must be >= 1 when set".to_string(),
        ));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "connect-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates the site origin
///
/// The origin is used as a literal prefix, so only emptiness and basic URL
/// shape are checked here.
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    if config.origin.is_empty() {
        return Err(ConfigError::Validation("origin cannot be empty".to_string()));
    }
    validate_http_url("origin", &config.origin)
}

/// Validates that every selector compiles
fn validate_selector_config(config: &SelectorConfig) -> Result<(), ConfigError> {
    let selectors = [
        ("topic-item", &config.topic_item),
        ("topic-link", &config.topic_link),
        ("topic-name", &config.topic_name),
        ("pagination-item", &config.pagination_item),
        ("pagination-link", &config.pagination_link),
        ("review-item", &config.review_item),
        ("review-title-link", &config.review_title_link),
        ("authors", &config.authors),
        ("metadata-block", &config.metadata_block),
        ("date", &config.date),
    ];

    for (name, selector) in selectors {
        Selector::parse(selector).map_err(|e| {
            ConfigError::InvalidSelector(format!("{} '{}': {:?}", name, selector, e))
        })?;
    }

    if config.active_class.trim().is_empty() || config.active_class.contains(' ') {
        return Err(ConfigError::Validation(format!(
            "active-class must be a single class name, got '{}'",
            config.active_class
        )));
    }

    Ok(())
}

/// Validates user agent and extra headers
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    for (name, value) in &config.headers {
        HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ConfigError::Validation(format!("Invalid header name '{}'", name)))?;
        HeaderValue::from_str(value).map_err(|_| {
            ConfigError::Validation(format!("Invalid value for header '{}'", name))
        })?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.path.is_empty() {
        return Err(ConfigError::Validation(
            "output path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    Ok(())
}
