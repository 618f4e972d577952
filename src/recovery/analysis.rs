//! Pass 1: Analysis
//!
//! Backward scan from the newest record that sorts transactions into
//! winners (redo) and losers (undo). Stops at a checkpoint start whose
//! checkpoint end was already seen; that end's snapshot becomes the base
//! state for redo.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::database::{Database, Pass};
use crate::wal::{LogRecord, TxnId};

/// Redo and undo sets built by analysis
///
/// A transaction id is in at most one of the two sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionTable {
    redo: HashSet<TxnId>,
    undo: HashSet<TxnId>,
}

impl TransactionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a commit. A commit overrides any earlier loser classification.
    pub fn mark_committed(&mut self, txn: &str) {
        self.undo.remove(txn);
        if self.redo.insert(txn.to_string()) {
            debug!(txn, "classified as redo");
        }
    }

    /// Record activity without a commit; ignored for known winners
    pub fn mark_loser(&mut self, txn: &str) {
        if self.redo.contains(txn) {
            return;
        }
        if self.undo.insert(txn.to_string()) {
            debug!(txn, "classified as undo");
        }
    }

    /// Whether `txn` must be redone. Unknown ids are not members.
    pub fn is_redo(&self, txn: &str) -> bool {
        self.redo.contains(txn)
    }

    /// Whether `txn` must be undone. Unknown ids are not members.
    pub fn is_undo(&self, txn: &str) -> bool {
        self.undo.contains(txn)
    }

    pub fn redo_set(&self) -> &HashSet<TxnId> {
        &self.redo
    }

    pub fn undo_set(&self) -> &HashSet<TxnId> {
        &self.undo
    }
}

/// Outcome of the analysis pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub table: TransactionTable,

    /// Index where the backward scan stopped (0 if it reached the front)
    pub stop: usize,

    /// Index of the checkpoint end whose snapshot was installed, if any
    pub checkpoint_end: Option<usize>,
}

/// Run the analysis pass over `records`
///
/// Installs the newest checkpoint-end snapshot into `db` and records the
/// pass 1 boundaries. An empty log yields empty sets and a `[0, 0]` range.
pub fn run(records: &[LogRecord], db: &mut Database) -> Analysis {
    let mut table = TransactionTable::new();
    let Some(newest) = records.len().checked_sub(1) else {
        db.set_start_pass(Pass::Analysis, 0);
        db.set_end_pass(Pass::Analysis, 0);
        return Analysis {
            table,
            stop: 0,
            checkpoint_end: None,
        };
    };
    let mut checkpoint_end = None;
    let mut stop = 0;

    for (index, record) in records.iter().enumerate().rev() {
        match record {
            LogRecord::Commit { transaction: Some(txn) } => table.mark_committed(txn),
            LogRecord::CheckpointStart { active } => {
                for txn in active {
                    table.mark_loser(txn);
                }
                if checkpoint_end.is_some() {
                    debug!(index, "reached start of completed checkpoint");
                    stop = index;
                    break;
                }
            }
            LogRecord::CheckpointEnd { snapshot } => {
                // Only the newest completed checkpoint counts
                if checkpoint_end.is_none() {
                    for (item, value) in snapshot {
                        db.set(item.as_str(), *value);
                    }
                    debug!(index, items = snapshot.len(), "installed checkpoint snapshot");
                    checkpoint_end = Some(index);
                }
            }
            other => {
                if let Some(txn) = other.transaction() {
                    table.mark_loser(txn);
                }
            }
        }
    }

    db.set_start_pass(Pass::Analysis, newest);
    db.set_end_pass(Pass::Analysis, stop);

    info!(
        start = newest,
        end = stop,
        redo = table.redo_set().len(),
        undo = table.undo_set().len(),
        "analysis pass complete"
    );

    Analysis {
        table,
        stop,
        checkpoint_end,
    }
}
