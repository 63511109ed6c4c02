//! Error types for record loading.

use thiserror::Error;

/// Errors that can occur while loading user records from disk.
#[derive(Debug, Error)]
pub enum CoreError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience alias for results with [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
