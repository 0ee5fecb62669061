//! Error types for the statement_extract library.
//!
//! Parsing text never fails; these errors only come from reading input,
//! writing output and validating a record before it is handed on.

use std::io;
use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, writing or validating statements.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error occurred during read or write operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading or writing JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error writing CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Missing required field.
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Invalid format specified.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Format used in a direction it does not support.
    #[error("Format '{format}' cannot be used as {direction}")]
    UnsupportedFormat {
        format: &'static str,
        direction: &'static str,
    },

    /// Invalid amount format.
    #[error("Invalid amount format: {0}")]
    InvalidAmount(String),
}
