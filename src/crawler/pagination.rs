//! Pagination discovery on a topic's front page

use crate::crawler::selectors::{first_match, SiteSelectors};
use scraper::Html;

/// Extracts the URLs of a topic's remaining listing pages
///
/// Walks the pagination items in document order. The item carrying the active
/// class is the page being viewed (always the front page) and is skipped, as
/// are items without a link. No deduplication is performed.
pub fn resolve_pagination(html: &str, selectors: &SiteSelectors) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut urls = Vec::new();
    let mut items = 0;

    for item in document.select(&selectors.pagination_item) {
        items += 1;
        let is_active = item
            .value()
            .classes()
            .any(|class| class == selectors.active_class);
        if is_active {
            continue;
        }

        match first_match(item, &selectors.pagination_link).and_then(|link| link.value().attr("href")) {
            Some(href) => urls.push(href.to_string()),
            None => tracing::debug!("Pagination item without link, skipping"),
        }
    }

    if items == 0 {
        tracing::debug!("No pagination items found, treating as a single-page topic");
    }

    urls
}
