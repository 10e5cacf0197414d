//! File type detection from leading bytes

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

/// Number of leading bytes inspected for delimited text
pub const SNIFF_LEN: usize = 1024;

/// Shortest input worth classifying: one magic number
pub const MIN_INPUT_LEN: usize = 4;

const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];
const OLE2_MAGIC: [u8; 4] = [0xD0, 0xCF, 0x11, 0xE0];

// Word characters, commas, quotes and whitespace only
static DELIMITED_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[\w,"'\s]*$"#).expect("Failed to build delimited text pattern"));

/// Recognized input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FileKind {
    /// ZIP container (XLSX)
    Container,
    /// OLE2 compound document (legacy `.xls`); recognized, never parsed
    LegacyBinary,
    /// Comma separated text
    DelimitedText,
}

/// Classify input by its leading bytes
///
/// # Examples
/// ```
/// use sheetsift::sniff::{sniff, FileKind};
///
/// assert_eq!(sniff(b"PK\x03\x04rest").unwrap(), FileKind::Container);
/// assert_eq!(sniff("名称,代码\n北大,1".as_bytes()).unwrap(), FileKind::DelimitedText);
/// assert!(sniff(b"%PDF-1.7").is_err());
/// ```
pub fn sniff(bytes: &[u8]) -> Result<FileKind> {
    if bytes.len() < MIN_INPUT_LEN {
        return Err(Error::UnsupportedFormat(format!(
            "{} bytes is too short to classify",
            bytes.len()
        )));
    }

    let kind = if bytes.starts_with(&ZIP_MAGIC) {
        FileKind::Container
    } else if bytes.starts_with(&OLE2_MAGIC) {
        FileKind::LegacyBinary
    } else if looks_like_delimited_text(&bytes[..bytes.len().min(SNIFF_LEN)]) {
        FileKind::DelimitedText
    } else {
        return Err(Error::UnsupportedFormat(
            "not an XLSX container or comma separated text".into(),
        ));
    };

    debug!("sniffed {} bytes as {:?}", bytes.len(), kind);
    Ok(kind)
}

fn looks_like_delimited_text(head: &[u8]) -> bool {
    let text = match std::str::from_utf8(head) {
        Ok(text) => text,
        // A character cut by the sniff window is dropped
        Err(e) if e.error_len().is_none() => match std::str::from_utf8(&head[..e.valid_up_to()]) {
            Ok(text) => text,
            Err(_) => return false,
        },
        Err(_) => return false,
    };
    DELIMITED_TEXT.is_match(text)
}

/// Check a file name against the extensions the application offers
/// (`.xlsx`, `.xls`, `.csv`, any case)
///
/// This is a pre-filter for file choosers only; [`sniff`] decides the
/// actual format.
pub fn is_supported_file_name(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        ["xlsx", "xls", "csv"]
            .iter()
            .any(|supported| ext.eq_ignore_ascii_case(supported))
    })
}
