//! Error types for mockups-cli

use thiserror::Error;

/// Main error type for mockups-cli operations.
///
/// Only genuinely fatal conditions live here; recoverable problems
/// (missing config file, empty match set, bad formatter config, malformed
/// wire messages) are absorbed by the component that encounters them.
#[derive(Error, Debug)]
pub enum MockupsError {
    #[error("Failed to parse {path}: {message}")]
    ConfigParse { path: String, message: String },

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Cannot create output directory {path}: {source}")]
    OutputDir {
        path: String,
        source: std::io::Error,
    },

    #[error("Cannot write {path}: {source}")]
    OutputWrite {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for mockups-cli operations
pub type Result<T> = std::result::Result<T, MockupsError>;
