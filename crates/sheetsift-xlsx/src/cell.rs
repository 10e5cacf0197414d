//! Cell value decoding for `<c>` elements

use sheetsift_core::CellValue;

use crate::shared_strings::{decode_excel_escapes, SharedStrings};
use crate::xml::{NodeId, XmlDocument};

/// Decode the value of a `<c>` element
///
/// | `t`         | value                                          |
/// |-------------|------------------------------------------------|
/// | `s`         | shared string at index `<v>` (`""` if absent)  |
/// | `b`         | `true` iff `<v>` is exactly `1`                |
/// | `inlineStr` | text of the first `<t>` under `<is>`           |
/// | other       | finite number, else the literal text           |
///
/// A cell without a value is an empty string.
pub fn resolve_value(doc: &XmlDocument, cell: NodeId, shared: &SharedStrings) -> CellValue {
    let cell_type = doc.attribute(cell, "t");

    if cell_type == Some("inlineStr") {
        let text = doc
            .first_child(cell, "is")
            .and_then(|is| doc.first_descendant(is, "t"))
            .map(|t| decode_excel_escapes(&doc.text_content(t)))
            .unwrap_or_default();
        return CellValue::String(text);
    }

    let text = doc
        .first_child(cell, "v")
        .map(|v| doc.text_content(v))
        .unwrap_or_default();
    if text.is_empty() {
        return CellValue::empty();
    }

    match cell_type {
        Some("s") => {
            let value = text
                .trim()
                .parse::<usize>()
                .map(|index| shared.get(index))
                .unwrap_or("");
            CellValue::string(value)
        }
        Some("b") => CellValue::Boolean(text == "1"),
        _ => parse_number(&text),
    }
}

/// A finite `f64`, or the text itself
fn parse_number(text: &str) -> CellValue {
    match text.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::string(text),
    }
}
