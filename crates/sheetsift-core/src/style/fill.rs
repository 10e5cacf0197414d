//! Fill/background style types

use super::color::DEFAULT_FILL_COLOR;

/// Kind of background fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum FillType {
    /// No fill (transparent)
    #[default]
    None,
    /// Solid color fill
    Solid,
    /// Hatch or dot pattern
    Pattern,
    /// Gradient fill
    Gradient,
}

/// Fill style for cell background
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FillStyle {
    /// Fill kind
    pub fill_type: FillType,
    /// Foreground color as `#RRGGBB`
    pub color: String,
}

impl Default for FillStyle {
    fn default() -> Self {
        Self {
            fill_type: FillType::None,
            color: DEFAULT_FILL_COLOR.to_string(),
        }
    }
}

impl FillStyle {
    /// Create a solid fill with the given color
    pub fn solid<S: Into<String>>(color: S) -> Self {
        Self {
            fill_type: FillType::Solid,
            color: color.into(),
        }
    }

    /// Check if this is a "no fill"
    pub fn is_none(&self) -> bool {
        self.fill_type == FillType::None
    }
}
