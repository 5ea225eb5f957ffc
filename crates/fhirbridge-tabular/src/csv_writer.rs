//! CSV output writer for flattened records.

use std::io::Write;

use crate::flat::{COLUMNS, FlatRecord};
use crate::{Error, Result};

/// CSV output writer configuration.
#[derive(Debug, Clone)]
pub struct CsvWriter {
    /// Whether to include a header row.
    pub include_header: bool,

    /// Field delimiter (default: comma).
    pub delimiter: u8,

    /// Quote character (default: double quote).
    pub quote: u8,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self {
            include_header: true,
            delimiter: b',',
            quote: b'"',
        }
    }
}

impl CsvWriter {
    /// Create a new CSV writer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to include a header row.
    pub fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the quote character.
    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    pub fn content_type(&self) -> &'static str {
        "text/csv; charset=utf-8"
    }

    pub fn file_extension(&self) -> &'static str {
        "csv"
    }

    /// Write records as delimited text, one row per record, in order.
    pub fn write(&self, records: &[FlatRecord], output: &mut dyn Write) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote(self.quote)
            .has_headers(false) // headers written manually below
            .from_writer(output);

        if self.include_header {
            writer
                .write_record(COLUMNS)
                .map_err(|e| Error::Output(e.to_string()))?;
        }

        for record in records {
            writer
                .write_record(record.values())
                .map_err(|e| Error::Output(e.to_string()))?;
        }

        writer.flush().map_err(|e| Error::Output(e.to_string()))?;

        Ok(())
    }

    /// Render records to an in-memory string.
    pub fn write_to_string(&self, records: &[FlatRecord]) -> Result<String> {
        let mut output = Vec::new();
        self.write(records, &mut output)?;
        String::from_utf8(output).map_err(|e| Error::Output(e.to_string()))
    }
}
