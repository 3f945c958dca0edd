//! Accumulation of review records across a crawl

use crate::state::ReviewRecord;

/// Collects records in topic discovery order, and within a topic in the
/// order its pages were fetched
#[derive(Debug, Default)]
pub struct ResultAggregator {
    records: Vec<ReviewRecord>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the records extracted from one page
    pub fn push_page(&mut self, records: Vec<ReviewRecord>) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Closes the aggregator, handing out its records as a single-pass sequence
    pub fn into_records(self) -> Records {
        Records {
            inner: self.records.into_iter(),
        }
    }
}

/// Forward-only sequence over the records of one crawl run
///
/// Each pull yields the next record until the sequence is exhausted; it
/// cannot be rewound. A new crawl run produces a new sequence.
#[derive(Debug)]
pub struct Records {
    inner: std::vec::IntoIter<ReviewRecord>,
}

impl Iterator for Records {
    type Item = ReviewRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Records {}
