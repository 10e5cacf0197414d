//! Format-neutral sheet grid
//!
//! Readers decode their source into a [`SheetGrid`]; the table assembler
//! consumes it without knowing where the cells came from.

use std::collections::BTreeMap;

use crate::cell::CellValue;
use crate::style::CellStyle;

/// A decoded source cell
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceCell {
    /// Resolved value
    pub value: CellValue,
    /// Resolved style, present only when the source declared one
    pub style: Option<CellStyle>,
}

impl SourceCell {
    /// Create an unstyled cell
    pub fn new<V: Into<CellValue>>(value: V) -> Self {
        Self {
            value: value.into(),
            style: None,
        }
    }

    /// Attach a style
    pub fn with_style(mut self, style: CellStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Check if the value is empty
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// One row of a [`SheetGrid`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridRow {
    /// Row index (0-based)
    pub index: u32,
    cells: BTreeMap<u32, SourceCell>,
}

impl GridRow {
    /// Create an empty row
    pub fn new(index: u32) -> Self {
        Self {
            index,
            cells: BTreeMap::new(),
        }
    }

    /// Set the cell at a 0-based column, replacing any previous one
    pub fn insert(&mut self, col: u32, cell: SourceCell) {
        self.cells.insert(col, cell);
    }

    /// Get the cell at a 0-based column
    pub fn get(&self, col: u32) -> Option<&SourceCell> {
        self.cells.get(&col)
    }

    /// Iterate cells in column order
    pub fn cells(&self) -> impl Iterator<Item = (u32, &SourceCell)> {
        self.cells.iter().map(|(col, cell)| (*col, cell))
    }

    /// Highest occupied column, if any
    pub fn last_column(&self) -> Option<u32> {
        self.cells.keys().next_back().copied()
    }

    /// Number of cells present
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Rows of a sheet in document order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetGrid {
    rows: Vec<GridRow>,
}

impl SheetGrid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row
    pub fn push_row(&mut self, row: GridRow) {
        self.rows.push(row);
    }

    /// All rows in document order
    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    /// First row with the given index
    pub fn row(&self, index: u32) -> Option<&GridRow> {
        self.rows.iter().find(|row| row.index == index)
    }

    /// The header row (index 0)
    pub fn header_row(&self) -> Option<&GridRow> {
        self.row(0)
    }

    /// Rows after the header, in document order
    pub fn data_rows(&self) -> impl Iterator<Item = &GridRow> {
        self.rows.iter().filter(|row| row.index >= 1)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the grid has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<GridRow> for SheetGrid {
    fn from_iter<I: IntoIterator<Item = GridRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
