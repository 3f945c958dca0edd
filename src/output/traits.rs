//! Output handler traits and types

use crate::state::ReviewRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for output handlers
///
/// Output handlers receive the crawl's records one at a time, in the order
/// the crawl produced them.
pub trait OutputHandler {
    /// Records a single review
    fn write_record(&mut self, record: &ReviewRecord) -> OutputResult<()>;

    /// Drains a record sequence into the handler
    ///
    /// # Returns
    ///
    /// The number of records written
    fn write_records<I>(&mut self, records: I) -> OutputResult<usize>
    where
        I: IntoIterator<Item = ReviewRecord>,
        Self: Sized,
    {
        let mut written = 0;
        for record in records {
            self.write_record(&record)?;
            written += 1;
        }
        Ok(written)
    }

    /// Finalizes the output, flushing any buffered data
    fn finish(&mut self) -> OutputResult<()>;
}
