//! Pipe-delimited record writer
//!
//! One line per record, fields in the order `url|topic|title|authors|date`,
//! absent fields written as empty strings. Field contents are written
//! untouched; authors markup in particular is passed through as-is.

use crate::output::traits::{OutputError, OutputHandler, OutputResult};
use crate::state::ReviewRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes records as pipe-delimited lines to any writer
pub struct DelimitedWriter<W: Write> {
    writer: BufWriter<W>,
    lines: usize,
}

impl DelimitedWriter<File> {
    /// Creates (or truncates) the file at `path`
    pub fn create(path: &Path) -> OutputResult<Self> {
        let file = File::create(path).map_err(|e| {
            OutputError::Write(format!("Cannot create {}: {}", path.display(), e))
        })?;
        Ok(Self::new(file))
    }
}

impl<W: Write> DelimitedWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            lines: 0,
        }
    }

    /// Number of lines written so far
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flushes and returns the underlying writer
    pub fn into_inner(self) -> OutputResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| OutputError::Io(e.into_error()))
    }
}

impl<W: Write> OutputHandler for DelimitedWriter<W> {
    fn write_record(&mut self, record: &ReviewRecord) -> OutputResult<()> {
        writeln!(self.writer, "{}", record)?;
        self.lines += 1;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}
