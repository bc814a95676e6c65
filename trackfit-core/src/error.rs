//! Error types for the trackfit core library.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for catalog, store and configuration operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The exercises root directory does not exist or is not a directory.
    #[error("Exercises directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// An exercise document could not be parsed.
    #[error("Malformed exercise document {}: {source}", path.display())]
    Malformed {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Serialization failure while writing a record or a column value.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// SQLite persistence error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, CatalogError>;
