//! Write-Ahead Log (WAL) Module
//!
//! The log is the only source of truth during recovery.
//!
//! ## Responsibilities
//! - Typed log records, one variant per record kind
//! - Parsing and rendering of the CSV line format
//! - Reading a log file oldest-first, with malformed line handling
//! - Writing logs in the same format
//!
//! ## File Format
//! One record per line, comma separated, no header:
//! ```text
//! ┌───────┬──────────────────┬──────────────────────────────────────┐
//! │ Field │ Kind             │ Remaining fields                     │
//! ├───────┼──────────────────┼──────────────────────────────────────┤
//! │ I     │ Init             │ txn (optional), item, initial        │
//! │ S     │ Start            │ txn (optional)                       │
//! │ C     │ Commit           │ txn (optional)                       │
//! │ CS    │ Checkpoint start │ active txn ids...                    │
//! │ CE    │ Checkpoint end   │ item, value, item, value, ...        │
//! │ A     │ Abort            │ txn (optional)                       │
//! │ U     │ Update           │ txn (optional), item, initial, after │
//! └───────┴──────────────────┴──────────────────────────────────────┘
//! ```

mod record;
mod reader;
mod writer;

pub use record::{LogRecord, RecordKind, TxnId};
pub use reader::{ReadStats, WalReader};
pub use writer::WalWriter;
