//! Cell styling types
//!
//! This module contains the resolved formatting attached to a cell:
//! - [`CellStyle`] - Complete cell style
//! - [`FontStyle`] - Font settings
//! - [`FillStyle`] - Background fill
//! - [`BorderStyle`] - Cell borders
//! - [`Alignment`] - Text alignment
//! - [`Color`] - Declared color, before resolution to `#RRGGBB`
//! - [`ThemePalette`] - Document color scheme
//!
//! Colors inside a [`CellStyle`] are already resolved to `#RRGGBB` strings;
//! the reader crates do the resolution with [`Color::resolve`].

mod alignment;
mod border;
mod color;
mod fill;
mod font;
mod theme;

pub use alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
pub use border::{BorderEdge, BorderLineStyle, BorderStyle};
pub use color::{Color, DEFAULT_FILL_COLOR, DEFAULT_FONT_COLOR};
pub use fill::{FillStyle, FillType};
pub use font::FontStyle;
pub use theme::{ThemePalette, FALLBACK_THEME_PALETTE};

/// Complete cell style
///
/// Every field has a defined default, so `CellStyle::default()` is the style
/// of a cell whose style record could not be found.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellStyle {
    /// Font settings
    pub font: FontStyle,
    /// Fill/background settings
    pub fill: FillStyle,
    /// Border settings
    pub border: BorderStyle,
    /// Text alignment
    pub alignment: Alignment,
}

impl CellStyle {
    /// Create a new default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font to bold
    pub fn bold(mut self, bold: bool) -> Self {
        self.font.bold = bold;
        self
    }

    /// Set font color (`#RRGGBB`)
    pub fn font_color<S: Into<String>>(mut self, color: S) -> Self {
        self.font.color = color.into();
        self
    }

    /// Set a solid fill color (`#RRGGBB`)
    pub fn fill_color<S: Into<String>>(mut self, color: S) -> Self {
        self.fill = FillStyle::solid(color);
        self
    }

    /// Set horizontal alignment
    pub fn horizontal_alignment(mut self, align: HorizontalAlignment) -> Self {
        self.alignment.horizontal = align;
        self
    }
}
