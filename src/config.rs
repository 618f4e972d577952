//! Configuration for ariesdb
//!
//! Centralized recovery configuration with sensible defaults.

/// Main configuration for a recovery run
#[derive(Debug, Clone, Default)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Log Reading Configuration
    // -------------------------------------------------------------------------
    /// What to do with a log line that does not parse
    pub malformed_records: MalformedRecordPolicy,

    // -------------------------------------------------------------------------
    // Undo Configuration
    // -------------------------------------------------------------------------
    /// Where the backward undo scan (pass 3) is allowed to stop
    pub undo_boundary: UndoBoundary,
}

/// Handling of malformed log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedRecordPolicy {
    /// Log a warning, drop the line and keep reading
    #[default]
    Skip,

    /// Fail the whole read on the first malformed line
    Abort,
}

/// Stop condition for the undo pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UndoBoundary {
    /// Stop at the record where the last outstanding loser's `Start` is reached.
    /// Falls back to the front of the log if some loser has no `Start`.
    #[default]
    LoserStart,

    /// Always scan back to index 0
    FrontOfLog,
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the malformed record policy
    pub fn malformed_records(mut self, policy: MalformedRecordPolicy) -> Self {
        self.config.malformed_records = policy;
        self
    }

    /// Set the undo pass boundary
    pub fn undo_boundary(mut self, boundary: UndoBoundary) -> Self {
        self.config.undo_boundary = boundary;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
