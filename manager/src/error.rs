//! Error types for loading manager configuration.
//!
//! Verification failures are not config errors; they surface as
//! [`VerificationError`](iospec_core::VerificationError) from the manager's
//! `verify_*` and `process_*` methods.

use thiserror::Error;

/// Errors that can occur while loading a [`ManagerSpec`](crate::ManagerSpec).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
