//! Pass 2: Redo
//!
//! Forward scan from where analysis stopped, reapplying the after-image of
//! every update made by a redo-set transaction. Writes are blind overwrites,
//! so running the pass twice leaves the database unchanged.

use tracing::{debug, info};

use crate::database::{Database, Pass};
use crate::wal::LogRecord;
use super::analysis::TransactionTable;

/// Run the redo pass over `records[start..]`
///
/// Returns the index of the last record that produced a write, or `start`
/// when nothing was written. Pass 2 boundaries are recorded in `db`.
pub fn run(records: &[LogRecord], start: usize, table: &TransactionTable, db: &mut Database) -> usize {
    let mut last_write = start;
    let mut writes = 0u64;

    for (index, record) in records.iter().enumerate().skip(start) {
        let (item, value) = match record {
            LogRecord::Update { transaction: Some(txn), item, after, .. } if table.is_redo(txn) => {
                (item, *after)
            }
            _ => continue,
        };

        debug!(index, item = item.as_str(), value, "redo");
        db.set(item.as_str(), value);
        last_write = index;
        writes += 1;
    }

    db.set_start_pass(Pass::Redo, start);
    db.set_end_pass(Pass::Redo, last_write);

    info!(start, end = last_write, writes, "redo pass complete");

    last_write
}
