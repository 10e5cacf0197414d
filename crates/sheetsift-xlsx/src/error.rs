//! XLSX error types

use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Result type for XML parsing
pub type XmlResult<T> = std::result::Result<T, XmlError>;

/// Errors that can occur during XLSX reading
#[derive(Debug, Error)]
pub enum XlsxError {
    /// The ZIP structure is damaged or truncated
    #[error("Corrupt archive at offset {offset}: {reason}")]
    CorruptArchive { offset: usize, reason: String },

    /// Entry uses a compression method other than stored or deflate
    #[error("Unsupported compression method {method} for entry '{entry}'")]
    UnsupportedCompression { entry: String, method: u16 },

    /// Every inflate strategy failed for an entry
    #[error("Failed to decompress '{entry}': {reason}")]
    Decompress { entry: String, reason: String },

    /// An XML part could not be parsed
    #[error("Malformed XML in '{part}': {source}")]
    MalformedXml {
        part: String,
        #[source]
        source: XmlError,
    },

    /// A part the workbook cannot be read without is absent
    #[error("Missing required part: {0}")]
    MissingRequiredEntry(String),

    /// Entry lookup by name failed
    #[error("Entry not found: {0}")]
    MissingEntry(String),
}

/// Errors produced by the XML tokenizer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum XmlError {
    /// A tag, comment, CDATA section or declaration never ends
    #[error("unterminated {construct} starting at byte {offset}")]
    Unterminated {
        construct: &'static str,
        offset: usize,
    },

    /// Closing tag does not match the innermost open element
    #[error("closing tag </{found}> does not match <{expected}> at byte {offset}")]
    MismatchedTag {
        expected: String,
        found: String,
        offset: usize,
    },

    /// Closing tag with no open element
    #[error("unexpected closing tag </{tag}> at byte {offset}")]
    UnexpectedClosingTag { tag: String, offset: usize },

    /// Elements still open at end of input
    #[error("element <{tag}> is never closed")]
    DanglingTag { tag: String },

    /// Input bytes are not UTF-8
    #[error("invalid UTF-8 at byte {offset}")]
    InvalidEncoding { offset: usize },
}

impl XlsxError {
    /// Build a [`XlsxError::CorruptArchive`]
    pub(crate) fn corrupt<S: Into<String>>(offset: usize, reason: S) -> Self {
        XlsxError::CorruptArchive {
            offset,
            reason: reason.into(),
        }
    }

    /// Attach the part name to an XML error
    pub(crate) fn malformed<S: Into<String>>(part: S, source: XmlError) -> Self {
        XlsxError::MalformedXml {
            part: part.into(),
            source,
        }
    }
}
