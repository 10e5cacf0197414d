//! Attribute schema configuration
//!
//! The schema names the *fixed* attributes: columns that are always present
//! in the output, in a canonical order, whatever their position in the
//! source sheet. Any other header becomes a *dynamic* attribute.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Canonical fixed attributes
pub const FIXED_ATTRIBUTES: [&str; 5] = ["学校名称", "专业名称", "学校代码", "专业代码", "位次差"];

/// Fixed attributes shown without their name
pub const NO_LABEL_ATTRIBUTES: [&str; 2] = ["学校代码", "专业代码"];

/// Fixed attribute names and label visibility
///
/// # Examples
/// ```
/// use sheetsift::AttributeSchema;
///
/// let schema = AttributeSchema::from_json_str(
///     r#"{"fixedAttributes": ["Name", "Code"], "noLabelAttributes": ["Code"]}"#,
/// ).unwrap();
/// assert!(schema.is_fixed("Name"));
/// assert!(!schema.shows_label("Code"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSchema {
    fixed_attributes: Vec<String>,
    no_label_attributes: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawSchema {
    fixed_attributes: Vec<String>,
    #[serde(default)]
    no_label_attributes: Vec<String>,
}

impl Default for AttributeSchema {
    fn default() -> Self {
        Self {
            fixed_attributes: FIXED_ATTRIBUTES.iter().map(|s| s.to_string()).collect(),
            no_label_attributes: NO_LABEL_ATTRIBUTES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AttributeSchema {
    /// Create a validated schema
    ///
    /// Fixed names must be non-empty and unique; every no-label name must be
    /// a fixed attribute.
    pub fn new<I, J, S, T>(fixed_attributes: I, no_label_attributes: J) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        let fixed_attributes: Vec<String> = fixed_attributes.into_iter().map(Into::into).collect();
        let no_label_attributes: Vec<String> =
            no_label_attributes.into_iter().map(Into::into).collect();

        let mut seen = HashSet::new();
        for name in &fixed_attributes {
            if name.is_empty() {
                return Err(Error::Schema("fixed attribute names must not be empty".into()));
            }
            if !seen.insert(name.as_str()) {
                return Err(Error::Schema(format!("duplicate fixed attribute '{}'", name)));
            }
        }

        if let Some(stray) = no_label_attributes.iter().find(|n| !seen.contains(n.as_str())) {
            return Err(Error::Schema(format!(
                "no-label attribute '{}' is not a fixed attribute",
                stray
            )));
        }

        Ok(Self {
            fixed_attributes,
            no_label_attributes,
        })
    }

    /// Load from a JSON document with `fixedAttributes` and optional
    /// `noLabelAttributes` arrays
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawSchema =
            serde_json::from_str(json).map_err(|e| Error::Schema(e.to_string()))?;
        Self::new(raw.fixed_attributes, raw.no_label_attributes)
    }

    /// Fixed attributes in canonical order
    pub fn fixed_attributes(&self) -> &[String] {
        &self.fixed_attributes
    }

    /// Attributes displayed without their name
    pub fn no_label_attributes(&self) -> &[String] {
        &self.no_label_attributes
    }

    /// Check if a header names a fixed attribute
    pub fn is_fixed(&self, name: &str) -> bool {
        self.fixed_attributes.iter().any(|n| n == name)
    }

    /// Whether a cell of this attribute displays its label
    pub fn shows_label(&self, name: &str) -> bool {
        !self.no_label_attributes.iter().any(|n| n == name)
    }
}
