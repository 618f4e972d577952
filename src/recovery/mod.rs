//! Recovery Module
//!
//! Restores a [`Database`] from a write-ahead log with three passes over the
//! fully loaded record sequence.
//!
//! ## Passes
//! ```text
//!   index 0 (oldest)                                      index N-1 (newest)
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │ ... │ CS │ ... │ CE │ ...                                           │
//!   └──────────────────────────────────────────────────────────────────────┘
//!   1. Analysis        stop ◄──────────────────────────────────────── start
//!   2. Redo           start ────────────────────────────────────────► last write
//!   3. Undo   loser start ◄──────────────────────────────────────── start
//! ```
//!
//! Analysis decides which transactions to redo and which to undo and stops
//! at the start of the newest completed checkpoint. Redo replays winners
//! forward from there. Undo reverts losers backward from the tail.

pub mod analysis;
pub mod redo;
pub mod undo;

use std::path::Path;

use tracing::{info, warn};

use crate::config::Config;
use crate::database::{Database, Pass};
use crate::error::Result;
use crate::wal::{LogRecord, WalReader};

pub use analysis::{Analysis, TransactionTable};

/// Runs crash recovery against write-ahead logs
#[derive(Debug, Clone, Default)]
pub struct RecoveryEngine {
    config: Config,
}

impl RecoveryEngine {
    /// Create an engine with the given config
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Recover the database described by the log at `path`
    ///
    /// An unreadable log fails the whole run; no partial database is
    /// returned.
    pub fn recover(&self, path: impl AsRef<Path>) -> Result<Database> {
        let path = path.as_ref();
        info!(path = %path.display(), "performing recovery");

        let records = self.read_log(path)?;
        Ok(self.recover_records(&records))
    }

    /// Load the records of a log, oldest first
    pub fn read_log(&self, path: impl AsRef<Path>) -> Result<Vec<LogRecord>> {
        let reader = WalReader::open(path.as_ref())?;
        let (records, stats) = reader.read_all(self.config.malformed_records)?;

        if stats.records_skipped > 0 {
            warn!(
                skipped = stats.records_skipped,
                parsed = stats.records_parsed,
                "log contained malformed records"
            );
        }

        Ok(records)
    }

    /// Run analysis, redo and undo over an in-memory record sequence
    ///
    /// When analysis finds no committed transaction, the database is
    /// returned after an empty redo pass and the pass 3 range stays `[0, 0]`.
    pub fn recover_records(&self, records: &[LogRecord]) -> Database {
        let mut db = Database::new();

        if records.is_empty() {
            info!("empty log, nothing to recover");
            return db;
        }

        let analysis = analysis::run(records, &mut db);
        redo::run(records, analysis.stop, &analysis.table, &mut db);

        if analysis.table.redo_set().is_empty() {
            info!(
                losers = analysis.table.undo_set().len(),
                "no committed transactions, skipping undo"
            );
            return db;
        }

        undo::run(records, &analysis.table, self.config.undo_boundary, &mut db);

        info!(
            items = db.len(),
            analysis = ?db.pass_range(Pass::Analysis),
            redo = ?db.pass_range(Pass::Redo),
            undo = ?db.pass_range(Pass::Undo),
            "recovery complete"
        );

        db
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Recover the log at `path` with the default configuration
pub fn recover(path: impl AsRef<Path>) -> Result<Database> {
    RecoveryEngine::default().recover(path)
}

/// Read the log at `path` with the default configuration
pub fn read_log(path: impl AsRef<Path>) -> Result<Vec<LogRecord>> {
    RecoveryEngine::default().read_log(path)
}
