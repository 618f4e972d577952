//! Tests for WAL Writer
//!
//! These tests verify:
//! - Written logs read back record-for-record
//! - Create truncates, open appends
//! - Record counting

use std::fs;
use std::path::PathBuf;

use ariesdb::wal::{LogRecord, WalReader, WalWriter};
use ariesdb::MalformedRecordPolicy;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_log() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("test.csv");
    (temp_dir, log_path)
}

fn sample_records() -> Vec<LogRecord> {
    ["I,,A,1", "S,T1", "U,T1,A,1,5", "CS,T1", "CE,A,5", "C,T1"]
        .iter()
        .map(|line| LogRecord::parse(line).unwrap())
        .collect()
}

fn read_back(path: &PathBuf) -> Vec<LogRecord> {
    let (records, stats) = WalReader::open(path)
        .unwrap()
        .read_all(MalformedRecordPolicy::Abort)
        .unwrap();
    assert_eq!(stats.records_skipped, 0);
    records
}

// =============================================================================
// Write Tests
// =============================================================================

#[test]
fn test_write_and_read_back() {
    let (_temp, log_path) = setup_temp_log();
    let records = sample_records();

    {
        let mut writer = WalWriter::create(&log_path).unwrap();
        writer.append_all(&records).unwrap();
        writer.sync().unwrap();
        assert_eq!(writer.records_written(), records.len() as u64);
    }

    assert_eq!(read_back(&log_path), records);
}

#[test]
fn test_one_record_per_line() {
    let (_temp, log_path) = setup_temp_log();

    {
        let mut writer = WalWriter::create(&log_path).unwrap();
        writer.append(&LogRecord::parse("S,T1").unwrap()).unwrap();
        writer.append(&LogRecord::parse("U,T1,A,5,7").unwrap()).unwrap();
    }

    assert_eq!(fs::read_to_string(&log_path).unwrap(), "S,T1\nU,T1,A,5,7\n");
}

#[test]
fn test_create_truncates_existing_log() {
    let (_temp, log_path) = setup_temp_log();
    fs::write(&log_path, "S,T9\nC,T9\n").unwrap();

    {
        let mut writer = WalWriter::create(&log_path).unwrap();
        writer.append(&LogRecord::parse("S,T1").unwrap()).unwrap();
    }

    assert_eq!(read_back(&log_path), vec![LogRecord::parse("S,T1").unwrap()]);
}

#[test]
fn test_open_appends_to_existing_log() {
    let (_temp, log_path) = setup_temp_log();
    fs::write(&log_path, "S,T1\n").unwrap();

    {
        let mut writer = WalWriter::open(&log_path).unwrap();
        writer.append(&LogRecord::parse("C,T1").unwrap()).unwrap();
        writer.sync().unwrap();
    }

    let records = read_back(&log_path);
    assert_eq!(records.len(), 2);
    assert_eq!(records[1], LogRecord::parse("C,T1").unwrap());
}
