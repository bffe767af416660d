//! Error types
//!
//! Gameplay itself is infallible; errors only come from configuration,
//! storage and the host frame scheduler.

use thiserror::Error;

/// Invalid or unreadable game configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

/// Key-value storage failure
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,

    #[error("write rejected for key `{key}`: {reason}")]
    WriteRejected { key: String, reason: String },
}

/// Host refused to schedule a frame callback
#[derive(Debug, Error)]
#[error("frame request failed: {0}")]
pub struct SchedulerError(pub String);
