//! Color representation and resolution

use std::fmt;

use super::theme::{ThemePalette, FALLBACK_THEME_PALETTE};

/// Default font and border color
pub const DEFAULT_FONT_COLOR: &str = "#000000";

/// Default fill color
pub const DEFAULT_FILL_COLOR: &str = "#FFFFFF";

/// A color as declared in a style part, before resolution
///
/// Priority when several forms are declared is `rgb` over `theme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Nothing declared; resolves to the caller's default
    #[default]
    Auto,

    /// Explicit RGB color (any alpha channel is dropped)
    Rgb { r: u8, g: u8, b: u8 },

    /// Theme color index, resolved against a [`ThemePalette`]
    Theme { index: u32 },
}

impl Color {
    /// Create an RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Create a theme color
    pub const fn theme(index: u32) -> Self {
        Color::Theme { index }
    }

    /// Create from a hex string (`"#FF0000"`, `"FF0000"` or ARGB `"FFFF0000"`)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let rgb = match hex.len() {
            6 => hex,
            8 => &hex[2..],
            _ => return None,
        };

        let r = u8::from_str_radix(&rgb[0..2], 16).ok()?;
        let g = u8::from_str_radix(&rgb[2..4], 16).ok()?;
        let b = u8::from_str_radix(&rgb[4..6], 16).ok()?;
        Some(Color::Rgb { r, g, b })
    }

    /// Resolve to a `#RRGGBB` string
    ///
    /// Theme indices go through `theme` when one is available, otherwise
    /// through the fixed fallback palette. Anything that cannot be resolved
    /// becomes `default`.
    pub fn resolve(&self, theme: Option<&ThemePalette>, default: &str) -> String {
        match self {
            Color::Rgb { r, g, b } => format!("#{:02X}{:02X}{:02X}", r, g, b),
            Color::Theme { index } => {
                let resolved = match theme {
                    Some(palette) => palette.accent(*index).map(str::to_string),
                    None => FALLBACK_THEME_PALETTE
                        .get(*index as usize)
                        .map(|hex| hex.to_string()),
                };
                resolved.unwrap_or_else(|| default.to_string())
            }
            Color::Auto => default.to_string(),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Auto => write!(f, "auto"),
            Color::Rgb { r, g, b } => write!(f, "#{:02X}{:02X}{:02X}", r, g, b),
            Color::Theme { index } => write!(f, "theme({})", index),
        }
    }
}
