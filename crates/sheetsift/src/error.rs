//! Error types for the sheetsift pipeline

use sheetsift_csv::CsvError;
use sheetsift_xlsx::XlsxError;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can end a parse
#[derive(Debug, Error)]
pub enum Error {
    /// Input is not a format the engine reads
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// XLSX package error
    #[error(transparent)]
    Xlsx(#[from] XlsxError),

    /// Delimited text error
    #[error(transparent)]
    Csv(#[from] CsvError),

    /// Attribute schema is invalid
    #[error("Invalid attribute schema: {0}")]
    Schema(String),

    /// The sheet has no first row to take attribute names from
    #[error("Spreadsheet has no header row")]
    MissingHeaderRow,
}

/// Broad failure category, for callers that only need to branch on the cause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Not a container or delimited text, or a legacy binary workbook
    UnsupportedFormat,
    /// Damaged or truncated archive, or undecodable entry data
    CorruptArchive,
    /// Archive entry compressed with something other than stored/deflate
    UnsupportedCompression,
    /// A package part is not well-formed XML
    MalformedXml,
    /// A part the workbook needs is absent
    MissingRequiredEntry,
    /// Delimited text could not be decoded
    InvalidText,
    /// Attribute schema rejected
    InvalidConfiguration,
    /// No header row
    MissingHeaderRow,
}

impl Error {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Error::Xlsx(e) => match e {
                XlsxError::CorruptArchive { .. } | XlsxError::Decompress { .. } => {
                    ErrorKind::CorruptArchive
                }
                XlsxError::UnsupportedCompression { .. } => ErrorKind::UnsupportedCompression,
                XlsxError::MalformedXml { .. } => ErrorKind::MalformedXml,
                XlsxError::MissingRequiredEntry(_) | XlsxError::MissingEntry(_) => {
                    ErrorKind::MissingRequiredEntry
                }
            },
            Error::Csv(_) => ErrorKind::InvalidText,
            Error::Schema(_) => ErrorKind::InvalidConfiguration,
            Error::MissingHeaderRow => ErrorKind::MissingHeaderRow,
        }
    }
}
