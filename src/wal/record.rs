//! WAL record definitions
//!
//! Defines the structure of individual log records and their CSV form.

use std::fmt;
use std::str::FromStr;

use crate::error::{RecoveryError, Result};

/// Transaction identifier as written in the log (`T1`, `T2`, ...)
pub type TxnId = String;

/// A single record in the write-ahead log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogRecord {
    /// Initial value of a data item
    Init {
        transaction: Option<TxnId>,
        item: String,
        value: i64,
    },

    /// Transaction began
    Start { transaction: Option<TxnId> },

    /// Transaction committed
    Commit { transaction: Option<TxnId> },

    /// Transaction aborted
    Abort { transaction: Option<TxnId> },

    /// Data item changed from `before` to `after`
    Update {
        transaction: Option<TxnId>,
        item: String,
        before: i64,
        after: i64,
    },

    /// Checkpoint began while these transactions were active
    CheckpointStart { active: Vec<TxnId> },

    /// Checkpoint finished; database contents at that point
    CheckpointEnd { snapshot: Vec<(String, i64)> },
}

/// Kind of a log record, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Init,
    Start,
    Commit,
    Abort,
    Update,
    CheckpointStart,
    CheckpointEnd,
}

impl RecordKind {
    /// Selector written in the first CSV field
    pub fn selector(&self) -> &'static str {
        match self {
            RecordKind::Init => "I",
            RecordKind::Start => "S",
            RecordKind::Commit => "C",
            RecordKind::Abort => "A",
            RecordKind::Update => "U",
            RecordKind::CheckpointStart => "CS",
            RecordKind::CheckpointEnd => "CE",
        }
    }

    /// Resolve the first CSV field to a record kind
    ///
    /// `CS` and `CE` must match exactly; any other field starting with `C`
    /// is a commit. The remaining kinds are picked by their first character.
    fn from_selector(field: &str) -> Result<Self> {
        match field {
            "CS" => return Ok(RecordKind::CheckpointStart),
            "CE" => return Ok(RecordKind::CheckpointEnd),
            _ => {}
        }

        match field.chars().next() {
            Some('I') => Ok(RecordKind::Init),
            Some('S') => Ok(RecordKind::Start),
            Some('C') => Ok(RecordKind::Commit),
            Some('A') => Ok(RecordKind::Abort),
            Some('U') => Ok(RecordKind::Update),
            Some(_) => Err(RecoveryError::MalformedRecord(format!(
                "unknown record type '{}'",
                field
            ))),
            None => Err(RecoveryError::MalformedRecord(
                "empty record type".to_string(),
            )),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Init => "INIT",
            RecordKind::Start => "START",
            RecordKind::Commit => "COMMIT",
            RecordKind::Abort => "ABORT",
            RecordKind::Update => "UPDATE",
            RecordKind::CheckpointStart => "CHECKPOINT_START",
            RecordKind::CheckpointEnd => "CHECKPOINT_END",
        };
        f.write_str(name)
    }
}

impl LogRecord {
    /// Parse one CSV line into a record
    ///
    /// Format: `type,transaction,item,initial,updated`. Only `I` and `U`
    /// carry the item fields; `CS` and `CE` carry a comma-separated payload.
    pub fn parse(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let kind = RecordKind::from_selector(fields[0])?;

        let record = match kind {
            RecordKind::Init => {
                require_fields(kind, &fields, 4)?;
                LogRecord::Init {
                    transaction: transaction_field(&fields),
                    item: item_field(kind, fields[2])?,
                    value: value_field(kind, "initial value", fields[3])?,
                }
            }
            RecordKind::Start => LogRecord::Start {
                transaction: transaction_field(&fields),
            },
            RecordKind::Commit => LogRecord::Commit {
                transaction: transaction_field(&fields),
            },
            RecordKind::Abort => LogRecord::Abort {
                transaction: transaction_field(&fields),
            },
            RecordKind::Update => {
                require_fields(kind, &fields, 5)?;
                LogRecord::Update {
                    transaction: transaction_field(&fields),
                    item: item_field(kind, fields[2])?,
                    before: value_field(kind, "initial value", fields[3])?,
                    after: value_field(kind, "updated value", fields[4])?,
                }
            }
            RecordKind::CheckpointStart => LogRecord::CheckpointStart {
                active: fields[1..]
                    .iter()
                    .filter(|txn| !txn.is_empty())
                    .map(|txn| txn.to_string())
                    .collect(),
            },
            RecordKind::CheckpointEnd => LogRecord::CheckpointEnd {
                snapshot: parse_snapshot(&fields[1..])?,
            },
        };

        Ok(record)
    }

    /// Get the record kind
    pub fn kind(&self) -> RecordKind {
        match self {
            LogRecord::Init { .. } => RecordKind::Init,
            LogRecord::Start { .. } => RecordKind::Start,
            LogRecord::Commit { .. } => RecordKind::Commit,
            LogRecord::Abort { .. } => RecordKind::Abort,
            LogRecord::Update { .. } => RecordKind::Update,
            LogRecord::CheckpointStart { .. } => RecordKind::CheckpointStart,
            LogRecord::CheckpointEnd { .. } => RecordKind::CheckpointEnd,
        }
    }

    /// Transaction that wrote this record, if any
    ///
    /// Checkpoint records never belong to a single transaction.
    pub fn transaction(&self) -> Option<&str> {
        match self {
            LogRecord::Init { transaction, .. }
            | LogRecord::Start { transaction }
            | LogRecord::Commit { transaction }
            | LogRecord::Abort { transaction }
            | LogRecord::Update { transaction, .. } => transaction.as_deref(),
            LogRecord::CheckpointStart { .. } | LogRecord::CheckpointEnd { .. } => None,
        }
    }

    /// Render the CSV line read back by [`LogRecord::parse`]
    pub fn encode(&self) -> String {
        let selector = self.kind().selector();
        match self {
            LogRecord::Init { transaction, item, value } => {
                format!("{},{},{},{}", selector, txn_or_empty(transaction), item, value)
            }
            LogRecord::Start { transaction }
            | LogRecord::Commit { transaction }
            | LogRecord::Abort { transaction } => match transaction {
                Some(txn) => format!("{},{}", selector, txn),
                None => selector.to_string(),
            },
            LogRecord::Update { transaction, item, before, after } => format!(
                "{},{},{},{},{}",
                selector,
                txn_or_empty(transaction),
                item,
                before,
                after
            ),
            LogRecord::CheckpointStart { active } => {
                let mut line = selector.to_string();
                for txn in active {
                    line.push(',');
                    line.push_str(txn);
                }
                line
            }
            LogRecord::CheckpointEnd { snapshot } => {
                let mut line = selector.to_string();
                for (item, value) in snapshot {
                    line.push_str(&format!(",{},{}", item, value));
                }
                line
            }
        }
    }
}

impl FromStr for LogRecord {
    type Err = RecoveryError;

    fn from_str(s: &str) -> Result<Self> {
        LogRecord::parse(s)
    }
}

impl fmt::Display for LogRecord {
    /// Diagnostic form, e.g. `(UPDATE, T1, A, 5, 7)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.kind())?;
        match self {
            LogRecord::Init { transaction, item, value } => {
                if let Some(txn) = transaction {
                    write!(f, ", {}", txn)?;
                }
                write!(f, ", {}, {}", item, value)?;
            }
            LogRecord::Start { transaction }
            | LogRecord::Commit { transaction }
            | LogRecord::Abort { transaction } => {
                if let Some(txn) = transaction {
                    write!(f, ", {}", txn)?;
                }
            }
            LogRecord::Update { transaction, item, before, after } => {
                if let Some(txn) = transaction {
                    write!(f, ", {}", txn)?;
                }
                write!(f, ", {}, {}, {}", item, before, after)?;
            }
            LogRecord::CheckpointStart { active } => {
                write!(f, ", [{}]", active.join(", "))?;
            }
            LogRecord::CheckpointEnd { snapshot } => {
                let pairs: Vec<String> = snapshot
                    .iter()
                    .map(|(item, value)| format!("{}={}", item, value))
                    .collect();
                write!(f, ", {{{}}}", pairs.join(", "))?;
            }
        }
        write!(f, ")")
    }
}

// =============================================================================
// Field Helpers
// =============================================================================

fn require_fields(kind: RecordKind, fields: &[&str], expected: usize) -> Result<()> {
    if fields.len() < expected {
        return Err(RecoveryError::MalformedRecord(format!(
            "{} record needs {} fields, got {}",
            kind,
            expected,
            fields.len()
        )));
    }
    Ok(())
}

fn transaction_field(fields: &[&str]) -> Option<TxnId> {
    fields
        .get(1)
        .filter(|txn| !txn.is_empty())
        .map(|txn| txn.to_string())
}

fn item_field(kind: RecordKind, field: &str) -> Result<String> {
    if field.is_empty() {
        return Err(RecoveryError::MalformedRecord(format!(
            "{} record has an empty item name",
            kind
        )));
    }
    Ok(field.to_string())
}

fn value_field(kind: RecordKind, name: &str, field: &str) -> Result<i64> {
    field.parse().map_err(|_| {
        RecoveryError::MalformedRecord(format!(
            "{} record has a non-integer {}: '{}'",
            kind, name, field
        ))
    })
}

fn parse_snapshot(fields: &[&str]) -> Result<Vec<(String, i64)>> {
    if fields.len() % 2 != 0 {
        return Err(RecoveryError::MalformedRecord(format!(
            "{} payload must be item,value pairs, got {} fields",
            RecordKind::CheckpointEnd,
            fields.len()
        )));
    }

    fields
        .chunks_exact(2)
        .map(|pair| {
            let item = item_field(RecordKind::CheckpointEnd, pair[0])?;
            let value = value_field(RecordKind::CheckpointEnd, "value", pair[1])?;
            Ok((item, value))
        })
        .collect()
}

fn txn_or_empty(transaction: &Option<TxnId>) -> &str {
    transaction.as_deref().unwrap_or("")
}
