//! Error types for ariesdb
//!
//! Provides a unified error type for log reading and recovery.

use thiserror::Error;

/// Result type alias using RecoveryError
pub type Result<T> = std::result::Result<T, RecoveryError>;

/// Unified error type for ariesdb operations
#[derive(Debug, Error)]
pub enum RecoveryError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // WAL Errors
    // -------------------------------------------------------------------------
    #[error("Malformed log record: {0}")]
    MalformedRecord(String),

    // -------------------------------------------------------------------------
    // Database Errors
    // -------------------------------------------------------------------------
    #[error("Invalid recovery pass number: {0} (expected 1, 2 or 3)")]
    InvalidPass(u8),
}
