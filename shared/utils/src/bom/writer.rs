//! Tabular BOM writer
//!
//! Serializes report rows to delimited text with a fixed header row.

use cpq_models::{batch_columns, BatchRow, FlatRow, SINGLE_COLUMNS};
use std::io::Write;

use crate::error::ConsoleResult;

pub struct BomWriter {
    delimiter: u8,
}

impl Default for BomWriter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl BomWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `delimiter` between cells; non-ASCII delimiters fall back to `,`.
    pub fn with_delimiter(delimiter: char) -> Self {
        let delimiter = u8::try_from(delimiter).ok().filter(u8::is_ascii).unwrap_or(b',');
        Self { delimiter }
    }

    pub fn write_rows<W: Write>(&self, out: W, rows: &[FlatRow]) -> ConsoleResult<()> {
        let mut writer = self.builder().from_writer(out);
        writer.write_record(SINGLE_COLUMNS)?;
        for row in rows {
            writer.write_record(row.cells())?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_batch<W: Write>(&self, out: W, rows: &[BatchRow]) -> ConsoleResult<()> {
        let mut writer = self.builder().from_writer(out);
        writer.write_record(batch_columns())?;
        for row in rows {
            writer.write_record(row.cells())?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn rows_to_bytes(&self, rows: &[FlatRow]) -> ConsoleResult<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_rows(&mut buffer, rows)?;
        Ok(buffer)
    }

    pub fn batch_to_bytes(&self, rows: &[BatchRow]) -> ConsoleResult<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_batch(&mut buffer, rows)?;
        Ok(buffer)
    }

    fn builder(&self) -> csv::WriterBuilder {
        let mut builder = csv::WriterBuilder::new();
        builder.delimiter(self.delimiter).has_headers(false);
        builder
    }
}
