//! Pass 3: Undo
//!
//! Backward scan from the newest record, restoring the before-image of every
//! update made by an undo-set transaction. Scanning newest-first means a
//! loser's later writes to an item are reverted before its earlier ones.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::config::UndoBoundary;
use crate::database::{Database, Pass};
use crate::wal::LogRecord;
use super::analysis::TransactionTable;

/// Run the undo pass over `records`
///
/// With [`UndoBoundary::LoserStart`] the scan stops on the record where the
/// last outstanding loser's `Start` is found; a loser without a `Start`
/// keeps the scan going to index 0. Returns the index where the scan
/// stopped. An empty log leaves the pass 3 range at `[0, 0]`.
pub fn run(
    records: &[LogRecord],
    table: &TransactionTable,
    boundary: UndoBoundary,
    db: &mut Database,
) -> usize {
    let Some(newest) = records.len().checked_sub(1) else {
        db.set_start_pass(Pass::Undo, 0);
        db.set_end_pass(Pass::Undo, 0);
        return 0;
    };
    let mut outstanding: HashSet<&str> = table.undo_set().iter().map(String::as_str).collect();
    let mut stop = newest;
    let mut reverted = 0u64;

    for (index, record) in records.iter().enumerate().rev() {
        stop = index;

        match record {
            LogRecord::Update { transaction: Some(txn), item, before, .. } if table.is_undo(txn) => {
                debug!(index, txn = txn.as_str(), item = item.as_str(), value = *before, "undo");
                db.set(item.as_str(), *before);
                reverted += 1;
            }
            LogRecord::Start { transaction: Some(txn) } => {
                outstanding.remove(txn.as_str());
            }
            _ => {}
        }

        if boundary == UndoBoundary::LoserStart && outstanding.is_empty() {
            break;
        }
    }

    db.set_start_pass(Pass::Undo, newest);
    db.set_end_pass(Pass::Undo, stop);

    info!(start = newest, end = stop, reverted, "undo pass complete");

    stop
}
