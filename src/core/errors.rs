//! Shared error types for the application.
//!
//! Data-shape edge cases (missing numerics, absent sector codes) are NOT
//! errors; they degrade to defaults in the record types. These variants
//! cover operational failures only.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for klimatrank operations.
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message} ({})", path.display())]
    FileSystem {
        message: String,
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// A dataset snapshot that could not be parsed
    #[error("Invalid dataset {}: {message}", path.display())]
    Dataset { path: PathBuf, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors (bad CLI input, unknown identifiers)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Wrapped external errors
    #[error(transparent)]
    External(#[from] anyhow::Error),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a file system error with path context.
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: path.into(),
            source: Some(source),
        }
    }

    /// Create a dataset error with path context.
    pub fn dataset(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Dataset {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;
