//! WAL Reader
//!
//! Handles reading records from a log file, oldest first.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::MalformedRecordPolicy;
use crate::error::{RecoveryError, Result};
use super::LogRecord;

/// Reads records from a CSV log file
pub struct WalReader {
    /// Path of the log (kept for diagnostics)
    path: PathBuf,

    /// Buffered handle on the log file
    reader: BufReader<File>,
}

/// Counters collected while reading a log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadStats {
    /// Number of lines read from the file
    pub lines_read: u64,

    /// Number of lines that parsed into a record
    pub records_parsed: u64,

    /// Number of malformed lines that were dropped
    pub records_skipped: u64,
}

impl WalReader {
    /// Open a log file for reading
    ///
    /// Fails with an I/O error if the file is missing or unreadable.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
        })
    }

    /// Read every record in file order
    ///
    /// Malformed lines, including lines that are not valid UTF-8, are either
    /// skipped with a warning or fail the read, depending on `policy`. Line
    /// numbers in messages are 1-based.
    pub fn read_all(self, policy: MalformedRecordPolicy) -> Result<(Vec<LogRecord>, ReadStats)> {
        let mut records = Vec::new();
        let mut stats = ReadStats::default();

        for (index, bytes) in self.reader.split(b'\n').enumerate() {
            let bytes = bytes?;
            let line_number = index + 1;
            stats.lines_read += 1;

            // Undecodable bytes are a bad record, not a bad file
            let parsed = String::from_utf8(bytes)
                .map_err(|e| {
                    RecoveryError::MalformedRecord(format!(
                        "invalid UTF-8 after byte {}",
                        e.utf8_error().valid_up_to()
                    ))
                })
                .and_then(|line| LogRecord::parse(&line));

            match parsed {
                Ok(record) => {
                    stats.records_parsed += 1;
                    records.push(record);
                }
                Err(RecoveryError::MalformedRecord(reason)) => match policy {
                    MalformedRecordPolicy::Skip => {
                        warn!(
                            path = %self.path.display(),
                            line = line_number,
                            %reason,
                            "skipping malformed log record"
                        );
                        stats.records_skipped += 1;
                    }
                    MalformedRecordPolicy::Abort => {
                        return Err(RecoveryError::MalformedRecord(format!(
                            "line {}: {}",
                            line_number, reason
                        )));
                    }
                },
                Err(e) => return Err(e),
            }
        }

        debug!(
            path = %self.path.display(),
            lines = stats.lines_read,
            parsed = stats.records_parsed,
            skipped = stats.records_skipped,
            "read write-ahead log"
        );

        Ok((records, stats))
    }

    /// Get the path this reader was opened on
    pub fn path(&self) -> &Path {
        &self.path
    }
}
