//! CSV output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;

/// CSV formatter - one sentence per single-field record
pub struct CsvFormatter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvFormatter<W> {
    /// Create a new CSV formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(writer),
        }
    }
}

impl<W: Write> OutputFormatter for CsvFormatter<W> {
    fn write_sentence(&mut self, sentence: &str, _index: Option<usize>) -> Result<()> {
        self.writer.write_record([sentence])?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
