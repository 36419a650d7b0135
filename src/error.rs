//! Error types for the spei-batch library.

use std::io;
use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a pipe-delimited import is refused.
///
/// Both variants abort the whole import; no partial batch is ever returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ImportError {
    /// The file holds a header at most, no data rows.
    #[error("the file contains no data rows")]
    TooFewLines,

    /// A data row has fewer columns than the layout requires.
    #[error("line {line_number} is invalid: expected 11 columns, found {found}")]
    MalformedLine { line_number: usize, found: usize },
}

/// Error types that can occur while importing, exporting or checking inputs.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error occurred during read or write operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error writing CSV output.
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error writing JSON output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The pipe-delimited input was rejected.
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// A field value cannot be written without breaking the pipe layout.
    #[error("Record {record_id}: field '{field}' contains a delimiter or line break")]
    DelimiterInField { record_id: String, field: &'static str },

    /// Bearer token was blank.
    #[error("Bearer token is empty")]
    EmptyToken,

    /// Invalid format specified.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A built-in pattern failed to compile.
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}
