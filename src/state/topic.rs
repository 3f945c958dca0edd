//! Topic definitions for tracking a subject category through one crawl pass

use crate::state::PageContent;

/// A topic as listed on the topics index page
///
/// Immutable once discovered; `name` is carried into every record verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicStub {
    /// Topic name exactly as it appears on the index page
    pub name: String,

    /// URL of the first page of the topic's review listing
    pub front_url: String,
}

impl TopicStub {
    pub fn new(name: impl Into<String>, front_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            front_url: front_url.into(),
        }
    }
}

/// A topic being crawled
///
/// `pending_urls` starts as the front URL alone. Once pagination has been
/// resolved it holds only sub-page URLs, and it drains as pages are fetched
/// or dropped.
#[derive(Debug)]
pub struct Topic {
    pub stub: TopicStub,
    pending_urls: Vec<String>,
    fetched_pages: Vec<PageContent>,
}

impl Topic {
    /// Creates a topic whose only pending page is its front page
    pub fn new(stub: TopicStub) -> Self {
        let pending_urls = vec![stub.front_url.clone()];
        Self {
            stub,
            pending_urls,
            fetched_pages: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.stub.name
    }

    /// Records the fetched front page and replaces the pending list with the
    /// topic's sub-pages
    ///
    /// The front URL is filtered out even if pagination listed it again.
    pub fn resolve_front_page(&mut self, front: PageContent, sub_pages: Vec<String>) {
        let front_url = &self.stub.front_url;
        self.pending_urls = sub_pages
            .into_iter()
            .filter(|url| url != front_url)
            .collect();
        self.fetched_pages.push(front);
    }

    /// Hands the pending sub-page URLs to the scheduler, leaving none pending
    pub fn take_pending(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_urls)
    }

    /// Appends pages fetched by the scheduler, in completion order
    pub fn add_pages(&mut self, pages: Vec<PageContent>) {
        self.fetched_pages.extend(pages);
    }

    /// Consumes the topic, yielding its pages front page first
    pub fn into_pages(self) -> Vec<PageContent> {
        self.fetched_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub() -> TopicStub {
        TopicStub::new("Allergy & intolerance", "https://site.test/topic/allergy")
    }

    #[test]
    fn test_new_topic_pending_front_url() {
        let topic = Topic::new(stub());
        assert_eq!(topic.pending_urls, ["https://site.test/topic/allergy"]);
        assert!(topic.fetched_pages.is_empty());
        assert_eq!(topic.name(), "Allergy & intolerance");
    }

    #[test]
    fn test_resolve_front_page_excludes_front_url() {
        let mut topic = Topic::new(stub());
        let front = PageContent::new("https://site.test/topic/allergy", "<html></html>");

        topic.resolve_front_page(
            front,
            vec![
                "https://site.test/topic/allergy".to_string(),
                "https://site.test/topic/allergy?p=2".to_string(),
            ],
        );

        assert_eq!(topic.pending_urls, ["https://site.test/topic/allergy?p=2"]);
        assert_eq!(topic.fetched_pages.len(), 1);
    }

    #[test]
    fn test_take_pending_drains() {
        let mut topic = Topic::new(stub());
        topic.resolve_front_page(
            PageContent::new("https://site.test/topic/allergy", ""),
            vec!["https://site.test/topic/allergy?p=2".to_string()],
        );

        let pending = topic.take_pending();
        assert_eq!(pending.len(), 1);
        assert!(topic.pending_urls.is_empty());

        topic.add_pages(vec![PageContent::new(&pending[0], "")]);
        let pages = topic.into_pages();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].url, "https://site.test/topic/allergy");
    }
}
