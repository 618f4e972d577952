//! WAL Writer
//!
//! Handles appending records to a log file.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use super::LogRecord;

/// Appends records to a CSV log file, one per line
pub struct WalWriter {
    writer: BufWriter<File>,

    /// Records appended through this writer
    records_written: u64,
}

impl WalWriter {
    /// Create a log file, truncating any existing contents
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::from_file(file))
    }

    /// Open a log file for appending, creating it if needed
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::from_file(file))
    }

    fn from_file(file: File) -> Self {
        Self {
            writer: BufWriter::new(file),
            records_written: 0,
        }
    }

    /// Append a record to the log
    pub fn append(&mut self, record: &LogRecord) -> Result<()> {
        writeln!(self.writer, "{}", record.encode())?;
        self.records_written += 1;
        Ok(())
    }

    /// Append several records in order
    pub fn append_all<'a>(&mut self, records: impl IntoIterator<Item = &'a LogRecord>) -> Result<()> {
        for record in records {
            self.append(record)?;
        }
        Ok(())
    }

    /// Flush buffered records and fsync the file
    pub fn sync(&mut self) -> Result<()> {
        self.writer.flush()?;
        self.writer.get_ref().sync_all()?;
        Ok(())
    }

    /// Number of records appended through this writer
    pub fn records_written(&self) -> u64 {
        self.records_written
    }
}
