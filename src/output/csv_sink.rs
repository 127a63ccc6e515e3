//! CSV output sink
//!
//! Writes the header once on creation, then one row per record. Every row
//! is flushed as soon as it is written so an aborted crawl keeps all rows
//! produced before the failure.

use crate::extract::AddressRecord;
use crate::PymesError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Streaming CSV writer for address records
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvSink<File> {
    /// Creates (or truncates) the file at `path` and writes the header
    pub fn create(path: &Path) -> Result<Self, PymesError> {
        let file = File::create(path)?;
        tracing::debug!("Writing records to {}", path.display());
        Self::new(file)
    }
}

impl<W: Write> CsvSink<W> {
    /// Wraps `inner` and writes the header row
    pub fn new(inner: W) -> Result<Self, PymesError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .delimiter(b',')
            .quote(b'"')
            .quote_style(csv::QuoteStyle::Necessary)
            .terminator(csv::Terminator::CRLF)
            .from_writer(inner);

        writer.write_record(AddressRecord::HEADER)?;
        writer.flush()?;

        Ok(Self { writer })
    }

    /// Appends one record and flushes it
    pub fn write_record(&mut self, record: &AddressRecord) -> Result<(), PymesError> {
        self.writer.write_record(record.fields())?;
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes any buffered output
    pub fn finish(mut self) -> Result<(), PymesError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes and returns the underlying writer
    #[cfg(test)]
    fn into_inner(self) -> Result<W, PymesError> {
        self.writer.into_inner().map_err(|e| {
            PymesError::Io(std::io::Error::new(e.error().kind(), e.error().to_string()))
        })
    }
}
