//! Shared string table (`xl/sharedStrings.xml`)

use crate::error::XmlResult;
use crate::xml::XmlDocument;

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel uses this format to encode special characters in XML:
/// - `_x000d_` = CR (carriage return)
/// - `_x000a_` = LF (line feed)
/// - `_x0009_` = Tab
/// - `_x005f_` = Underscore (escaped underscore)
pub(crate) fn decode_excel_escapes(s: &str) -> String {
    if !s.contains("_x") {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find("_x") {
        result.push_str(&rest[..start]);
        let candidate = &rest[start..];

        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                // Not an escape; keep the underscore and rescan after it
                result.push('_');
                rest = &candidate[1..];
            }
        }
    }

    result.push_str(rest);
    result
}

/// Ordered list of shared strings referenced by index from `t="s"` cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedStrings {
    strings: Vec<String>,
}

impl SharedStrings {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from a parsed `sst` document
    ///
    /// Each `<si>` contributes the text of its first `<t>` descendant, or an
    /// empty string when it has none.
    pub fn build(doc: &XmlDocument) -> Self {
        let strings = doc
            .descendants(doc.root(), "si")
            .map(|si| {
                doc.first_descendant(si, "t")
                    .map(|t| decode_excel_escapes(&doc.text_content(t)))
                    .unwrap_or_default()
            })
            .collect();
        Self { strings }
    }

    /// Parse and build from the raw part
    pub fn from_bytes(bytes: &[u8]) -> XmlResult<Self> {
        Ok(Self::build(&XmlDocument::parse_bytes(bytes)?))
    }

    /// String at `index`; out-of-range indices yield `""`
    pub fn get(&self, index: usize) -> &str {
        self.strings.get(index).map_or("", String::as_str)
    }

    /// Number of strings
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl FromIterator<String> for SharedStrings {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            strings: iter.into_iter().collect(),
        }
    }
}
