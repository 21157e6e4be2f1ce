//! Core error types for breakclock-core.
//!
//! The timer state machine itself never fails: rejected intents are no-ops.
//! These types cover the fallible edges around it (configuration, the alert
//! backend, and the clock service channel).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for breakclock-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The clock service task has exited and no longer accepts commands.
    #[error("Clock service is not running")]
    ServiceStopped,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration directory could not be created.
    #[error("Failed to prepare configuration directory {path}: {source}")]
    DirUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Errors raised by an alert backend.
///
/// These are reported and swallowed by the timer: a failed beep never
/// changes timer state.
#[derive(Error, Debug)]
pub enum AlertError {
    /// The alert asset was never loaded or is not available.
    #[error("Alert asset is unavailable")]
    Unavailable,

    /// Writing to the playback device failed.
    #[error("Alert playback failed: {0}")]
    Playback(#[from] std::io::Error),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
