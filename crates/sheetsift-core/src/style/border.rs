//! Border style types

use super::color::DEFAULT_FONT_COLOR;

/// Border style for a cell; each side is resolved independently
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BorderStyle {
    /// Top border
    pub top: BorderEdge,
    /// Right border
    pub right: BorderEdge,
    /// Bottom border
    pub bottom: BorderEdge,
    /// Left border
    pub left: BorderEdge,
}

impl BorderStyle {
    /// Create a new border style with no borders
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if no side has a line
    pub fn is_empty(&self) -> bool {
        [&self.top, &self.right, &self.bottom, &self.left]
            .iter()
            .all(|edge| edge.style == BorderLineStyle::None)
    }
}

/// A single border edge
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BorderEdge {
    /// Line style
    pub style: BorderLineStyle,
    /// Line color as `#RRGGBB`
    pub color: String,
}

impl Default for BorderEdge {
    fn default() -> Self {
        Self {
            style: BorderLineStyle::None,
            color: DEFAULT_FONT_COLOR.to_string(),
        }
    }
}

impl BorderEdge {
    /// Create a new border edge
    pub fn new<S: Into<String>>(style: BorderLineStyle, color: S) -> Self {
        Self {
            style,
            color: color.into(),
        }
    }
}

/// Border line styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum BorderLineStyle {
    /// No border
    #[default]
    None,
    /// Thin line
    Thin,
    /// Medium line
    Medium,
    /// Thick line
    Thick,
    /// Dashed line
    Dashed,
    /// Dotted line
    Dotted,
    /// Double line
    Double,
    /// Hair line (very thin)
    Hair,
    /// Medium dashed
    MediumDashed,
    /// Dash-dot
    DashDot,
    /// Medium dash-dot
    MediumDashDot,
    /// Dash-dot-dot
    DashDotDot,
    /// Medium dash-dot-dot
    MediumDashDotDot,
    /// Slant dash-dot
    SlantDashDot,
}
