//! Topic discovery from the topics index page

use crate::crawler::selectors::{first_match, SiteSelectors};
use crate::state::TopicStub;
use scraper::Html;

/// Maps the topics index page to topic stubs, in document order
///
/// Each topic list item contributes its first link's `href` as the front URL
/// and its first button's text as the name. Items missing either are skipped.
///
/// # Returns
///
/// * `Ok(Vec<TopicStub>)` - The discovered topics
/// * `Err(String)` - No topic list item matched at all
pub fn discover_topics(html: &str, selectors: &SiteSelectors) -> Result<Vec<TopicStub>, String> {
    let document = Html::parse_document(html);

    let mut matched = 0;
    let mut topics = Vec::new();

    for item in document.select(&selectors.topic_item) {
        matched += 1;

        let front_url = first_match(item, &selectors.topic_link)
            .and_then(|link| link.value().attr("href"))
            .filter(|href| !href.is_empty());
        let name = first_match(item, &selectors.topic_name).map(|button| button.text().collect::<String>());

        match (name, front_url) {
            (Some(name), Some(front_url)) => topics.push(TopicStub::new(name, front_url)),
            (name, _) => {
                tracing::warn!(
                    item = matched,
                    name = name.as_deref().unwrap_or("<none>"),
                    "Skipping malformed topic list item"
                );
            }
        }
    }

    if matched == 0 {
        return Err("no topic list items found".to_string());
    }

    tracing::debug!("Discovered {} topics from {} list items", topics.len(), matched);
    Ok(topics)
}
