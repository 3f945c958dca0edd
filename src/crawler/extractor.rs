//! Review record extraction from a topic listing page
//!
//! One record is produced per review item, in document order. Field rules:
//!
//! | Field | Source | Fallback |
//! |-------|--------|----------|
//! | title | text of the first link in the title heading | absent |
//! | url | site origin + that link's `href`, concatenated as-is | absent |
//! | authors | inner markup of the authors block | "Not found" |
//! | date | inner markup of the date element inside the metadata block | "Not found" |
//!
//! A date element that exists but is empty yields an empty date, not the
//! fallback. A title link without `href` keeps its title; the url is then the
//! bare origin.

use crate::crawler::selectors::{first_match, SiteSelectors};
use crate::state::{PageContent, ReviewRecord};
use scraper::{ElementRef, Html};
use std::sync::Arc;

/// Extracts review records from fetched listing pages
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    selectors: Arc<SiteSelectors>,

    /// Prefix for review URLs
    origin: String,
}

impl RecordExtractor {
    pub fn new(selectors: Arc<SiteSelectors>, origin: impl Into<String>) -> Self {
        Self {
            selectors,
            origin: origin.into(),
        }
    }

    /// Extracts every review on `page`, attributing each to `topic`
    ///
    /// Missing parts of a review fall back field by field; a review item
    /// always yields a record.
    pub fn extract(&self, topic: &str, page: &PageContent) -> Vec<ReviewRecord> {
        let document = Html::parse_document(&page.body);

        let records: Vec<_> = document
            .select(&self.selectors.review_item)
            .map(|review| self.extract_review(topic, review))
            .collect();
        if records.is_empty() {
            tracing::debug!("No review items on {}", page.url);
        }
        records
    }

    fn extract_review(&self, topic: &str, review: ElementRef<'_>) -> ReviewRecord {
        let mut record = ReviewRecord::new(topic);

        if let Some(link) = first_match(review, &self.selectors.review_title_link) {
            let href = link.value().attr("href").unwrap_or_default();
            record.title = Some(link.text().collect());
            record.url = Some(format!("{}{}", self.origin, href));
        }

        if let Some(authors) = first_match(review, &self.selectors.authors) {
            record.authors = authors.inner_html();
        }

        if let Some(block) = first_match(review, &self.selectors.metadata_block) {
            if let Some(date) = first_match(block, &self.selectors.date) {
                record.date = date.inner_html();
            }
        }

        record
    }
}
