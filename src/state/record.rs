//! The bibliographic record extracted for each review

use std::fmt;

/// Placeholder for authors or date that could not be located
pub const NOT_FOUND: &str = "Not found";

/// Metadata for a single review
///
/// `title` and `url` are absent together when the review carries no title
/// anchor. `authors` and `date` fall back to [`NOT_FOUND`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    pub topic: String,
    pub title: Option<String>,
    pub url: Option<String>,

    /// Inner markup of the authors block, passed through untouched
    pub authors: String,

    pub date: String,
}

impl ReviewRecord {
    /// Creates a record for `topic` with every field at its default
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            title: None,
            url: None,
            authors: NOT_FOUND.to_string(),
            date: NOT_FOUND.to_string(),
        }
    }
}

/// Formats as `url|topic|title|authors|date`, absent fields written as nothing
impl fmt::Display for ReviewRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}|{}",
            self.url.as_deref().unwrap_or_default(),
            self.topic,
            self.title.as_deref().unwrap_or_default(),
            self.authors,
            self.date
        )
    }
}
