//! Table assembly from a sheet grid
//!
//! Attribute names come from the header row (row index 0). Fixed attributes
//! are looked up by name, so their physical column does not matter, and they
//! always lead the output in the schema's order.

use std::collections::{BTreeSet, HashSet};

use log::debug;
use sheetsift_core::{Cell, CellValue, GridRow, ParsedTable, SheetGrid, SourceCell, TableRow};

use crate::config::AttributeSchema;
use crate::error::{Error, Result};

/// Build the consumer-facing table from a grid
pub fn assemble(grid: &SheetGrid, schema: &AttributeSchema) -> Result<ParsedTable> {
    let header_row = grid.header_row().ok_or(Error::MissingHeaderRow)?;

    // Distinct header names at their first column, in column order
    let mut seen = HashSet::new();
    let columns: Vec<(String, u32)> = header_columns(header_row, sheet_width(grid))
        .into_iter()
        .filter(|(_, name)| seen.insert(name.clone()))
        .map(|(col, name)| (name, col))
        .collect();
    let column_of = |name: &str| columns.iter().find(|(n, _)| n == name).map(|&(_, c)| c);

    let fixed: Vec<(&str, Option<u32>)> = schema
        .fixed_attributes()
        .iter()
        .map(|name| (name.as_str(), column_of(name)))
        .collect();

    let dynamic: Vec<(&str, u32)> = columns
        .iter()
        .filter(|(name, _)| !schema.is_fixed(name))
        .map(|(name, col)| (name.as_str(), *col))
        .collect();

    debug!(
        "header row: {} distinct names, {} fixed found, {} dynamic",
        columns.len(),
        fixed.iter().filter(|(_, col)| col.is_some()).count(),
        dynamic.len()
    );

    let mut rows = Vec::new();
    for source in grid.data_rows() {
        let mut row = TableRow::new();
        let mut has_data = false;

        for &(name, col) in &fixed {
            let cell = col.and_then(|c| source.get(c));
            has_data |= cell.is_some_and(|c| !c.is_empty());
            row.insert(name, to_cell(cell, schema.shows_label(name)));
        }

        for &(name, col) in &dynamic {
            if let Some(cell) = source.get(col) {
                has_data |= !cell.is_empty();
                row.insert(name, to_cell(Some(cell), true));
            }
        }

        if has_data {
            rows.push(row);
        } else {
            debug!("dropping row {}: no values", source.index);
        }
    }

    let fixed_attributes = schema.fixed_attributes().to_vec();
    let dynamic_attributes: Vec<String> = dynamic.iter().map(|(n, _)| n.to_string()).collect();
    let headers = fixed_attributes
        .iter()
        .chain(dynamic_attributes.iter())
        .cloned()
        .collect();

    Ok(ParsedTable {
        headers,
        fixed_attributes,
        dynamic_attributes,
        no_label_attributes: schema
            .no_label_attributes()
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>(),
        total_rows: rows.len(),
        rows,
    })
}

/// Number of columns spanned by any row of the sheet
fn sheet_width(grid: &SheetGrid) -> u64 {
    grid.rows()
        .iter()
        .filter_map(GridRow::last_column)
        .max()
        .map_or(0, |c| c as u64 + 1)
}

/// Header text as `(column, name)` pairs in column order
///
/// An unlabeled column inside the sheet width reads as `""`. Only the first
/// one is listed, since later ones share its name.
fn header_columns(row: &GridRow, width: u64) -> Vec<(u32, String)> {
    let mut columns: Vec<(u32, String)> = row
        .cells()
        .map(|(col, cell)| (col, cell.value.to_string()))
        .collect();

    let mut gap = 0u64;
    for &(col, _) in &columns {
        if col as u64 != gap {
            break;
        }
        gap += 1;
    }
    if gap < width {
        let at = columns.partition_point(|&(col, _)| (col as u64) < gap);
        columns.insert(at, (gap as u32, String::new()));
    }

    columns
}

fn to_cell(source: Option<&SourceCell>, display_label: bool) -> Cell {
    match source {
        Some(source) => Cell::new(source.value.clone(), source.style.clone(), display_label),
        None => Cell::new(CellValue::empty(), None, display_label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sheetsift_core::{CellStyle, GridRow};

    fn grid(rows: &[&[(u32, &str)]]) -> SheetGrid {
        rows.iter()
            .enumerate()
            .map(|(index, cells)| {
                let mut row = GridRow::new(index as u32);
                for (col, value) in cells.iter() {
                    row.insert(*col, SourceCell::new(*value));
                }
                row
            })
            .collect()
    }

    fn schema() -> AttributeSchema {
        AttributeSchema::new(["名称", "代码"], ["代码"]).unwrap()
    }

    #[test]
    fn test_fixed_attributes_lead_in_canonical_order() {
        let g = grid(&[
            &[(0, "备注"), (1, "代码"), (2, "名称")],
            &[(0, "note"), (1, "10001"), (2, "北京大学")],
        ]);
        let table = assemble(&g, &schema()).unwrap();

        assert_eq!(table.headers, vec!["名称", "代码", "备注"]);
        assert_eq!(table.fixed_attributes, vec!["名称", "代码"]);
        assert_eq!(table.dynamic_attributes, vec!["备注"]);
        assert_eq!(table.total_rows, 1);

        let row = &table.rows[0];
        let names: Vec<&str> = row.names().collect();
        assert_eq!(names, vec!["名称", "代码", "备注"]);
        assert_eq!(row.get("名称").unwrap().value, CellValue::from("北京大学"));
        assert!(row.get("名称").unwrap().display_label);
        assert!(!row.get("代码").unwrap().display_label);
        assert!(row.get("备注").unwrap().display_label);
    }

    #[test]
    fn test_missing_fixed_column_gives_empty_cells() {
        let g = grid(&[&[(0, "名称"), (1, "x")], &[(0, "A"), (1, "1")]]);
        let table = assemble(&g, &schema()).unwrap();
        let code = table.rows[0].get("代码").unwrap();
        assert_eq!(code.value, CellValue::from(""));
        assert_eq!(code.style, None);
        assert!(table.headers.contains(&"代码".to_string()));
    }

    #[test]
    fn test_dynamic_cells_only_when_present() {
        let g = grid(&[
            &[(0, "名称"), (1, "x"), (2, "y")],
            &[(0, "A"), (2, "2")],
        ]);
        let table = assemble(&g, &schema()).unwrap();
        let row = &table.rows[0];
        assert!(!row.contains("x"));
        assert_eq!(row.get("y").unwrap().value, CellValue::from("2"));
    }

    #[test]
    fn test_empty_rows_dropped() {
        let g = grid(&[
            &[(0, "名称"), (1, "x")],
            &[],
            &[(0, ""), (1, "")],
            &[(1, "kept")],
        ]);
        let table = assemble(&g, &schema()).unwrap();
        assert_eq!(table.total_rows, 1);
        let row = &table.rows[0];
        // Kept in full, fixed cells included
        assert_eq!(row.len(), 3);
        assert_eq!(row.get("x").unwrap().value, CellValue::from("kept"));
    }

    #[test]
    fn test_duplicate_headers_read_first_column() {
        let g = grid(&[
            &[(0, "x"), (1, "y"), (2, "x"), (3, "名称")],
            &[(0, "1"), (1, "2"), (2, "3"), (3, "n")],
            &[(2, "only in duplicate")],
        ]);
        let table = assemble(&g, &schema()).unwrap();
        assert_eq!(table.dynamic_attributes, vec!["x", "y"]);
        assert_eq!(table.rows[0].get("x").unwrap().value, CellValue::from("1"));
        assert_eq!(table.total_rows, 1);
    }

    #[test]
    fn test_unlabeled_column_is_dynamic() {
        let g = grid(&[
            &[(0, "名称"), (2, "备注")],
            &[(1, "42")],
        ]);
        let table = assemble(&g, &schema()).unwrap();

        assert_eq!(table.headers, vec!["名称", "代码", "", "备注"]);
        assert_eq!(table.dynamic_attributes, vec!["", "备注"]);
        assert_eq!(table.total_rows, 1);
        assert_eq!(table.rows[0].get("").unwrap().value, CellValue::from("42"));
        assert!(!table.rows[0].contains("备注"));
    }

    #[test]
    fn test_unlabeled_column_past_header_end() {
        let g = grid(&[&[(0, "名称")], &[(0, "A"), (3, "tail")]]);
        let table = assemble(&g, &schema()).unwrap();

        // First unlabeled column is 1, so column 3 is never read
        assert_eq!(table.dynamic_attributes, vec![""]);
        assert!(!table.rows[0].contains(""));
    }

    #[test]
    fn test_empty_header_cell_counts_as_unlabeled() {
        let g = grid(&[&[(0, ""), (1, "名称")], &[(0, "v"), (1, "A")]]);
        let table = assemble(&g, &schema()).unwrap();
        assert_eq!(table.dynamic_attributes, vec![""]);
        assert_eq!(table.rows[0].get("").unwrap().value, CellValue::from("v"));
    }

    #[test]
    fn test_far_column_stays_sparse() {
        let mut header = GridRow::new(0);
        header.insert(0, SourceCell::new("名称"));
        header.insert(u32::MAX - 1, SourceCell::new("far"));
        let mut data = GridRow::new(1);
        data.insert(u32::MAX - 1, SourceCell::new("x"));
        let g: SheetGrid = vec![header, data].into_iter().collect();

        let table = assemble(&g, &schema()).unwrap();
        assert_eq!(table.dynamic_attributes, vec!["", "far"]);
        assert_eq!(table.rows[0].get("far").unwrap().value, CellValue::from("x"));
    }

    #[test]
    fn test_numeric_header_renders_as_text() {
        let mut header = GridRow::new(0);
        header.insert(0, SourceCell::new(2024.0));
        let mut data = GridRow::new(1);
        data.insert(0, SourceCell::new(7.0));
        let g: SheetGrid = vec![header, data].into_iter().collect();
        let table = assemble(&g, &schema()).unwrap();
        assert_eq!(table.dynamic_attributes, vec!["2024"]);
        assert_eq!(table.rows[0].get("2024").unwrap().value, CellValue::Number(7.0));
    }

    #[test]
    fn test_style_carried_over() {
        let mut header = GridRow::new(0);
        header.insert(0, SourceCell::new("名称"));
        let mut data = GridRow::new(1);
        data.insert(0, SourceCell::new("A").with_style(CellStyle::new().bold(true)));
        let g: SheetGrid = vec![header, data].into_iter().collect();
        let table = assemble(&g, &schema()).unwrap();
        assert!(table.rows[0].get("名称").unwrap().style.as_ref().unwrap().font.bold);
    }

    #[test]
    fn test_missing_header_row() {
        let mut row = GridRow::new(3);
        row.insert(0, SourceCell::new("x"));
        let g: SheetGrid = vec![row].into_iter().collect();
        assert!(matches!(assemble(&g, &schema()), Err(Error::MissingHeaderRow)));
        assert!(matches!(
            assemble(&SheetGrid::new(), &schema()),
            Err(Error::MissingHeaderRow)
        ));
    }

    #[test]
    fn test_header_only_sheet() {
        let g = grid(&[&[(0, "名称"), (1, "x")]]);
        let table = assemble(&g, &schema()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.headers, vec!["名称", "代码", "x"]);
        assert_eq!(
            table.no_label_attributes.into_iter().collect::<Vec<_>>(),
            vec!["代码".to_string()]
        );
    }
}
