//! CSV error types

use thiserror::Error;

/// Result type for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors that can occur while reading delimited text
#[derive(Debug, Error)]
pub enum CsvError {
    /// CSV library error (malformed quoting, I/O)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Input is not UTF-8
    #[error("Invalid UTF-8 in delimited text at byte {offset}")]
    Encoding { offset: usize },
}
