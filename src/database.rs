//! Database Module
//!
//! The key-value store being recovered, plus the log positions where each
//! recovery pass started and ended.
//!
//! ## Data Structure Choice
//! Items live in a BTreeMap so the rendered report lists them in sorted
//! order without a separate sort step.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::RecoveryError;

/// One of the three recovery passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Pass {
    Analysis = 1,
    Redo = 2,
    Undo = 3,
}

impl Pass {
    /// All passes in execution order
    pub const ALL: [Pass; 3] = [Pass::Analysis, Pass::Redo, Pass::Undo];

    /// External (1-based) pass number
    pub fn number(&self) -> u8 {
        *self as u8
    }

    fn slot(&self) -> usize {
        self.number() as usize - 1
    }
}

impl TryFrom<u8> for Pass {
    type Error = RecoveryError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        match number {
            1 => Ok(Pass::Analysis),
            2 => Ok(Pass::Redo),
            3 => Ok(Pass::Undo),
            other => Err(RecoveryError::InvalidPass(other)),
        }
    }
}

/// Log positions (0-based) covered by one pass
///
/// `start` is where the scan began, `end` where it stopped; for backward
/// passes `start >= end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassRange {
    pub start: usize,
    pub end: usize,
}

/// Key-value database rebuilt by recovery
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Database {
    /// Data items by name
    items: BTreeMap<String, i64>,

    /// Start/end log positions of passes 1, 2 and 3
    passes: [PassRange; 3],
}

impl Database {
    /// Create an empty database with all pass ranges at 0
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Data Items
    // =========================================================================

    /// Get the value of a data item
    pub fn get(&self, item: &str) -> Option<i64> {
        self.items.get(item).copied()
    }

    /// Set a data item, returning its previous value
    pub fn set(&mut self, item: impl Into<String>, value: i64) -> Option<i64> {
        self.items.insert(item.into(), value)
    }

    /// Remove a data item, returning its value
    pub fn remove(&mut self, item: &str) -> Option<i64> {
        self.items.remove(item)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.contains_key(item)
    }

    /// Number of data items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over items in sorted name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.items.iter().map(|(item, value)| (item.as_str(), *value))
    }

    // =========================================================================
    // Pass Bookkeeping
    // =========================================================================

    /// Set the log position where `pass` started
    pub fn set_start_pass(&mut self, pass: Pass, loc: usize) {
        self.passes[pass.slot()].start = loc;
    }

    /// Set the log position where `pass` ended
    pub fn set_end_pass(&mut self, pass: Pass, loc: usize) {
        self.passes[pass.slot()].end = loc;
    }

    pub fn start_pass(&self, pass: Pass) -> usize {
        self.passes[pass.slot()].start
    }

    pub fn end_pass(&self, pass: Pass) -> usize {
        self.passes[pass.slot()].end
    }

    /// Start and end of `pass` together
    pub fn pass_range(&self, pass: Pass) -> PassRange {
        self.passes[pass.slot()]
    }

    /// Render the recovery report (same text as `Display`)
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Database {
    /// `Database: {A=7, B=10} Recovery: Pass 1: [9, 0] Pass 2: [0, 7] Pass 3: [9, 3]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Database: {")?;
        for (i, (item, value)) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", item, value)?;
        }
        f.write_str("} Recovery:")?;

        for pass in Pass::ALL {
            let range = self.pass_range(pass);
            write!(f, " Pass {}: [{}, {}]", pass.number(), range.start, range.end)?;
        }

        Ok(())
    }
}
