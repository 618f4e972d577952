//! # ariesdb
//!
//! Crash recovery for a small key-value database, driven entirely by a
//! write-ahead log:
//! - Typed log records parsed from a CSV log
//! - ARIES-style analysis, redo and undo passes
//! - Checkpoint handling to shorten the analysis scan
//! - A deterministic report of the recovered state and pass boundaries
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Log file (CSV)                           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ WalReader
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │               Vec<LogRecord> (oldest first)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┼────────────┐
//!          ▼            ▼            ▼
//!   ┌───────────┐ ┌───────────┐ ┌───────────┐
//!   │ Analysis  │ │   Redo    │ │   Undo    │
//!   │ (backward)│ │ (forward) │ │ (backward)│
//!   └─────┬─────┘ └─────┬─────┘ └─────┬─────┘
//!         └─────────────┼─────────────┘
//!                       ▼
//!                ┌─────────────┐
//!                │  Database   │
//!                └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod wal;
pub mod database;
pub mod recovery;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RecoveryError, Result};
pub use config::{Config, MalformedRecordPolicy, UndoBoundary};
pub use database::{Database, Pass, PassRange};
pub use recovery::{read_log, recover, RecoveryEngine};
pub use wal::{LogRecord, RecordKind};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of ariesdb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
