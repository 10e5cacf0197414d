//! Theme color scheme (`xl/theme/theme1.xml`)

use log::debug;
use sheetsift_core::ThemePalette;

use crate::error::XmlResult;
use crate::xml::XmlDocument;

/// Read the `clrScheme` slots of a theme document
///
/// Each slot takes `srgbClr@val`, or `sysClr@lastClr` for system colors.
/// Slots with neither, or with a value that is not a hex color, are left out.
pub fn parse_theme(doc: &XmlDocument) -> ThemePalette {
    let mut palette = ThemePalette::new();

    let Some(scheme) = doc.first_descendant(doc.root(), "clrScheme") else {
        return palette;
    };

    for slot in doc.node(scheme).children.iter().copied() {
        let Some(name) = doc.local_tag(slot) else {
            continue;
        };

        let hex = doc
            .first_descendant(slot, "srgbClr")
            .and_then(|c| doc.attribute(c, "val"))
            .or_else(|| {
                doc.first_descendant(slot, "sysClr")
                    .and_then(|c| doc.attribute(c, "lastClr"))
            });

        if let Some(hex) = hex {
            if !palette.insert(name, hex) {
                debug!("theme slot {} has invalid color {:?}", name, hex);
            }
        }
    }

    palette
}

/// Parse a theme part from raw bytes
pub fn parse_theme_bytes(bytes: &[u8]) -> XmlResult<ThemePalette> {
    Ok(parse_theme(&XmlDocument::parse_bytes(bytes)?))
}
