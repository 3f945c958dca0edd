//! State module for the data that flows through a crawl
//!
//! # Components
//!
//! - `TopicStub` / `Topic`: a discovered subject category and its per-pass fetch state
//! - `PageContent` / `FetchOutcome` / `DroppedUrl`: results of page requests
//! - `ReviewRecord`: the bibliographic record emitted for each review

mod page;
mod record;
mod topic;

// Re-export main types
pub use page::{DroppedUrl, FetchOutcome, PageContent};
pub use record::{ReviewRecord, NOT_FOUND};
pub use topic::{Topic, TopicStub};
