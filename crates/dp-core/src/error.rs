//! Configuration validation errors.
//!
//! Sub-crates define their own error enums (`SyncError`, `EngineError`) and
//! wrap `ConfigError` as one variant via a `From` impl.  All configuration
//! problems are rejected before any agent thread spawns.

use thiserror::Error;

/// A scenario configuration that cannot produce a valid run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("agent count must be at least 2, got {0}")]
    TooFewAgents(usize),

    #[error("{what} interval is empty: min {min_ms} ms > max {max_ms} ms")]
    EmptyInterval {
        what:   &'static str,
        min_ms: u128,
        max_ms: u128,
    },

    #[error("run duration must be positive")]
    ZeroDuration,
}
