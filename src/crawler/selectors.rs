//! Compiled CSS selectors for the target site's markup

use crate::config::SelectorConfig;
use crate::CrawlError;
use scraper::{ElementRef, Selector};

/// Every selector the crawler queries with, compiled once per crawl
#[derive(Debug, Clone)]
pub struct SiteSelectors {
    pub topic_item: Selector,
    pub topic_link: Selector,
    pub topic_name: Selector,
    pub pagination_item: Selector,
    pub pagination_link: Selector,
    pub active_class: String,
    pub review_item: Selector,
    pub review_title_link: Selector,
    pub authors: Selector,
    pub metadata_block: Selector,
    pub date: Selector,
}

impl SiteSelectors {
    /// Compiles the configured selectors
    pub fn compile(config: &SelectorConfig) -> Result<Self, CrawlError> {
        Ok(Self {
            topic_item: parse_selector(&config.topic_item)?,
            topic_link: parse_selector(&config.topic_link)?,
            topic_name: parse_selector(&config.topic_name)?,
            pagination_item: parse_selector(&config.pagination_item)?,
            pagination_link: parse_selector(&config.pagination_link)?,
            active_class: config.active_class.clone(),
            review_item: parse_selector(&config.review_item)?,
            review_title_link: parse_selector(&config.review_title_link)?,
            authors: parse_selector(&config.authors)?,
            metadata_block: parse_selector(&config.metadata_block)?,
            date: parse_selector(&config.date)?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, CrawlError> {
    Selector::parse(selector).map_err(|e| CrawlError::Selector(format!("'{}': {:?}", selector, e)))
}

/// Returns the first descendant of `element` matching `selector`
pub(crate) fn first_match<'a>(element: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    element.select(selector).next()
}
