//! Tests for WAL Reader
//!
//! These tests verify:
//! - Reading records from a log file in order
//! - Empty file handling
//! - Malformed line handling under both policies
//! - Missing file errors

use std::fs;
use std::path::PathBuf;

use ariesdb::wal::{LogRecord, ReadStats, WalReader};
use ariesdb::{MalformedRecordPolicy, RecoveryError};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_log(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("test.csv");
    fs::write(&log_path, contents).unwrap();
    (temp_dir, log_path)
}

fn read(path: &PathBuf, policy: MalformedRecordPolicy) -> ariesdb::Result<(Vec<LogRecord>, ReadStats)> {
    WalReader::open(path)?.read_all(policy)
}

// =============================================================================
// Basic Reading Tests
// =============================================================================

#[test]
fn test_read_empty_file() {
    let (_temp, log_path) = setup_temp_log("");

    let (records, stats) = read(&log_path, MalformedRecordPolicy::Skip).unwrap();

    assert!(records.is_empty());
    assert_eq!(stats, ReadStats::default());
}

#[test]
fn test_read_records_in_file_order() {
    let (_temp, log_path) = setup_temp_log("S,T1\nU,T1,A,5,7\nC,T1\n");

    let (records, stats) = read(&log_path, MalformedRecordPolicy::Skip).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0], LogRecord::parse("S,T1").unwrap());
    assert_eq!(records[1], LogRecord::parse("U,T1,A,5,7").unwrap());
    assert_eq!(records[2], LogRecord::parse("C,T1").unwrap());
    assert_eq!(stats.lines_read, 3);
    assert_eq!(stats.records_parsed, 3);
    assert_eq!(stats.records_skipped, 0);
}

#[test]
fn test_read_without_trailing_newline() {
    let (_temp, log_path) = setup_temp_log("S,T1\nC,T1");

    let (records, _) = read(&log_path, MalformedRecordPolicy::Skip).unwrap();

    assert_eq!(records.len(), 2);
}

#[test]
fn test_read_crlf_line_endings() {
    let (_temp, log_path) = setup_temp_log("S,T1\r\nU,T1,A,5,7\r\nC,T1\r\n");

    let (records, stats) = read(&log_path, MalformedRecordPolicy::Abort).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(stats.records_skipped, 0);
}

#[test]
fn test_reader_keeps_path() {
    let (_temp, log_path) = setup_temp_log("S,T1\n");

    let reader = WalReader::open(&log_path).unwrap();

    assert_eq!(reader.path(), log_path.as_path());
}

// =============================================================================
// Malformed Line Tests
// =============================================================================

#[test]
fn test_skip_policy_drops_malformed_lines() {
    let (_temp, log_path) = setup_temp_log("S,T1\nX,T1\nU,T1,A,5,7\nU,T1,A\nC,T1\n");

    let (records, stats) = read(&log_path, MalformedRecordPolicy::Skip).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(stats.lines_read, 5);
    assert_eq!(stats.records_parsed, 3);
    assert_eq!(stats.records_skipped, 2);
    assert!(records.iter().all(|r| r.transaction() == Some("T1")));
}

#[test]
fn test_skip_policy_drops_blank_lines() {
    let (_temp, log_path) = setup_temp_log("S,T1\n\nC,T1\n");

    let (records, stats) = read(&log_path, MalformedRecordPolicy::Skip).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(stats.records_skipped, 1);
}

#[test]
fn test_skip_policy_drops_invalid_utf8_lines() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("test.csv");
    fs::write(&log_path, b"S,T1\nU,T1,A,0,1\n\xff\xfe,junk\nC,T1\n").unwrap();

    let (records, stats) = read(&log_path, MalformedRecordPolicy::Skip).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(stats.lines_read, 4);
    assert_eq!(stats.records_skipped, 1);
    assert_eq!(records[2], LogRecord::parse("C,T1").unwrap());
}

#[test]
fn test_abort_policy_rejects_invalid_utf8_line() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("test.csv");
    fs::write(&log_path, b"S,T1\nU,T1,A,0,1\n\xff\xfe,junk\nC,T1\n").unwrap();

    let result = read(&log_path, MalformedRecordPolicy::Abort);

    match result {
        Err(RecoveryError::MalformedRecord(msg)) => assert!(msg.starts_with("line 3:"), "{}", msg),
        other => panic!("Expected MalformedRecord, got {:?}", other),
    }
}

#[test]
fn test_abort_policy_reports_line_number() {
    let (_temp, log_path) = setup_temp_log("S,T1\nU,T1,A,5,7\nZ\nC,T1\n");

    let result = read(&log_path, MalformedRecordPolicy::Abort);

    match result {
        Err(RecoveryError::MalformedRecord(msg)) => assert!(msg.starts_with("line 3:"), "{}", msg),
        other => panic!("Expected MalformedRecord, got {:?}", other),
    }
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_open_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.csv");

    let result = WalReader::open(&missing);

    assert!(matches!(result, Err(RecoveryError::Io(_))));
}
