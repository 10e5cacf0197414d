//! Worksheet grid extraction

use log::{debug, trace};
use sheetsift_core::{CellAddress, GridRow, SheetGrid, SourceCell, ThemePalette, MAX_COLUMN};

use crate::cell::resolve_value;
use crate::shared_strings::SharedStrings;
use crate::styles::StyleSheet;
use crate::xml::XmlDocument;

/// Decode every `<row>` of a worksheet document into a grid
///
/// Row and column positions come from the `r` attributes. A row or cell
/// without a usable reference takes the position after its predecessor.
/// Cells past column XFD are skipped.
pub fn build_grid(
    doc: &XmlDocument,
    shared: &SharedStrings,
    styles: &StyleSheet,
    theme: Option<&ThemePalette>,
) -> SheetGrid {
    let mut grid = SheetGrid::new();
    let Some(sheet_data) = doc.first_descendant(doc.root(), "sheetData") else {
        return grid;
    };

    let mut next_row = 0u32;
    for row_node in doc.child_elements(sheet_data, "row") {
        let index = doc
            .attribute(row_node, "r")
            .and_then(|r| r.trim().parse::<u32>().ok())
            .and_then(|r| r.checked_sub(1))
            .unwrap_or(next_row);
        next_row = index.saturating_add(1);

        let mut row = GridRow::new(index);
        let mut next_col = 0u32;

        for cell in doc.child_elements(row_node, "c") {
            let col = doc
                .attribute(cell, "r")
                .and_then(|r| CellAddress::parse(r).ok())
                .map_or(next_col, |addr| addr.col);
            next_col = col.saturating_add(1);
            if col > MAX_COLUMN {
                debug!("skipping cell beyond column XFD in row {}", index as u64 + 1);
                continue;
            }

            let value = resolve_value(doc, cell, shared);
            let style = styles.resolve_cell(doc, cell, theme);
            trace!("row {} col {}: {:?}", index, col, value);

            row.insert(col, SourceCell { value, style });
        }

        grid.push_row(row);
    }

    grid
}
