//! Core error types for pomopro-core.
//!
//! Misusing an engine command is never an error (the command is ignored).
//! The errors here cover configuration I/O, input parsing, and internal
//! consistency checks on the session state.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomopro-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// A broken invariant of the session state. Always a bug in the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("seconds_left {seconds_left} exceeds the {max}s length of the current session")]
    SecondsOutOfRange { seconds_left: u32, max: u32 },

    #[error("session is running while a goal verdict is pending")]
    RunningWhilePending,

    #[error("habit log holds {log_len} records but {completed} sessions were completed")]
    LogLengthMismatch { log_len: usize, completed: u32 },

    #[error("habit record at position {index} has session number {found}, expected {expected}")]
    SessionNumberGap {
        index: usize,
        expected: u32,
        found: u32,
    },

    #[error("waiting for the next goal while the session is running, pending, or not a break")]
    AwaitingGoalWhileActive,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
