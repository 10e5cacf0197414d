//! Theme color palettes

use std::collections::BTreeMap;

use super::color::Color;

/// Palette used for theme-indexed colors when a workbook carries no theme
///
/// Index `i` corresponds to the `accent{i+1}` slot of the default Office
/// scheme, followed by the two hyperlink colors.
pub const FALLBACK_THEME_PALETTE: [&str; 8] = [
    "#4472C4", // accent1
    "#ED7D31", // accent2
    "#A5A5A5", // accent3
    "#FFC000", // accent4
    "#5B9BD5", // accent5
    "#70AD47", // accent6
    "#0563C1", // hlink
    "#954F72", // folHlink
];

/// A document's color scheme, keyed by slot name (`dk1`, `accent1`, ...)
///
/// Values are normalized `#RRGGBB` strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThemePalette {
    slots: BTreeMap<String, String>,
}

impl ThemePalette {
    /// Create an empty palette
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a palette from `(slot, hex)` pairs
    ///
    /// Hex values may omit the `#` and may be lowercase. Pairs whose value is
    /// not a hex color are skipped.
    pub fn from_slots<I, K, V>(slots: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut palette = Self::new();
        for (slot, hex) in slots {
            palette.insert(slot, hex.as_ref());
        }
        palette
    }

    /// Set a slot's color, returning `false` if `hex` is not a color
    pub fn insert<K: Into<String>>(&mut self, slot: K, hex: &str) -> bool {
        match Color::from_hex(hex) {
            Some(Color::Rgb { r, g, b }) => {
                self.slots
                    .insert(slot.into(), format!("#{:02X}{:02X}{:02X}", r, g, b));
                true
            }
            _ => false,
        }
    }

    /// Get a slot's color by name
    pub fn get(&self, slot: &str) -> Option<&str> {
        self.slots.get(slot).map(String::as_str)
    }

    /// Resolve a theme index through the accent slots (`index` 0 is `accent1`)
    pub fn accent(&self, index: u32) -> Option<&str> {
        self.get(&format!("accent{}", index as u64 + 1))
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the palette has no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
