//! Font style types

use super::color::DEFAULT_FONT_COLOR;

/// Font style settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontStyle {
    /// Bold
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Underlined (any underline variant)
    pub underline: bool,
    /// Font size in points
    pub size: f64,
    /// Font color as `#RRGGBB`
    pub color: String,
    /// Font family name (e.g., "Calibri", "Arial")
    pub name: String,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            size: 11.0,
            color: DEFAULT_FONT_COLOR.to_string(),
            name: "Calibri".to_string(),
        }
    }
}
