//! # Simulation Error Types
//!
//! Setup and configuration failures only. Hot-path conditions (unknown
//! targets, duplicate registration, full queues) are sentinel returns by
//! design - the per-damage path never constructs or propagates errors.

use thiserror::Error;

/// Errors that can occur while building or configuring the simulation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A config field failed validation.
    #[error("invalid configuration: {field}: {reason}")]
    InvalidConfig {
        /// The offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// Config file could not be read.
    #[error("failed to read config file: {0}")]
    ConfigRead(String),

    /// Config file could not be parsed as TOML.
    #[error("failed to parse config: {0}")]
    ConfigParse(String),
}

/// Result type for simulation setup operations.
pub type SimResult<T> = Result<T, SimError>;
