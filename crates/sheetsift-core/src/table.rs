//! Parsed table types handed to consumers

use std::collections::BTreeSet;

use crate::cell::CellValue;
use crate::style::CellStyle;

/// A table cell: value, optional style and whether the UI shows its label
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Cell {
    /// Cell value
    pub value: CellValue,
    /// Resolved style; `None` when the source cell was absent or unstyled
    pub style: Option<CellStyle>,
    /// Whether the attribute name is displayed next to the value
    pub display_label: bool,
}

impl Cell {
    /// Create a cell
    pub fn new<V: Into<CellValue>>(value: V, style: Option<CellStyle>, display_label: bool) -> Self {
        Self {
            value: value.into(),
            style,
            display_label,
        }
    }
}

/// A row of named cells, kept in insertion order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    cells: Vec<(String, Cell)>,
}

impl TableRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cell for an attribute, replacing an existing one in place
    pub fn insert<S: Into<String>>(&mut self, name: S, cell: Cell) {
        let name = name.into();
        match self.cells.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = cell,
            None => self.cells.push((name, cell)),
        }
    }

    /// Look up a cell by attribute name
    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.cells.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    /// Check if the row has a cell for the attribute
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate `(name, cell)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.cells.iter().map(|(n, c)| (n.as_str(), c))
    }

    /// Attribute names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(n, _)| n.as_str())
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(feature = "serde")]
mod row_serde {
    use super::{Cell, TableRow};
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;

    impl Serialize for TableRow {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.cells.len()))?;
            for (name, cell) in &self.cells {
                map.serialize_entry(name, cell)?;
            }
            map.end()
        }
    }

    struct RowVisitor;

    impl<'de> Visitor<'de> for RowVisitor {
        type Value = TableRow;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of attribute names to cells")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<TableRow, A::Error> {
            let mut row = TableRow::new();
            while let Some((name, cell)) = access.next_entry::<String, Cell>()? {
                row.insert(name, cell);
            }
            Ok(row)
        }
    }

    impl<'de> Deserialize<'de> for TableRow {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(RowVisitor)
        }
    }
}

/// The result of parsing one sheet
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ParsedTable {
    /// Fixed attributes in canonical order, then dynamic attributes in source order
    pub headers: Vec<String>,
    /// Fixed attribute names, canonical order
    pub fixed_attributes: Vec<String>,
    /// Non-fixed header names in source order
    pub dynamic_attributes: Vec<String>,
    /// Attributes whose label is hidden
    pub no_label_attributes: BTreeSet<String>,
    /// Kept data rows
    pub rows: Vec<TableRow>,
    /// Number of kept rows
    pub total_rows: usize,
}

impl ParsedTable {
    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one attribute across all rows (`None` where the row has no cell)
    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = Option<&'a CellValue>> + 'a {
        self.rows.iter().map(move |row| row.get(name).map(|c| &c.value))
    }
}
