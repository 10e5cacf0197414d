//! Tests for reading cell values.

use crate::{CellXml, SheetXml, XlsxBuilder};
use pretty_assertions::assert_eq;
use sheetsift_core::CellValue;
use sheetsift_xlsx::XlsxReader;

fn value(grid: &sheetsift_core::SheetGrid, row: u32, col: u32) -> Option<CellValue> {
    grid.row(row)
        .and_then(|r| r.get(col))
        .map(|c| c.value.clone())
}

#[test]
fn test_header_and_numeric_row() {
    let bytes = XlsxBuilder::new()
        .shared_strings(&["学校名称", "位次差"])
        .sheet(
            "Sheet1",
            SheetXml::new()
                .row(1, vec![CellXml::shared("A1", 0), CellXml::shared("B1", 1)])
                .row(2, vec![CellXml::inline("A2", "清华大学"), CellXml::number("B2", 1200.0)]),
        )
        .build();

    let grid = XlsxReader::read_first_sheet(&bytes).unwrap();
    assert_eq!(grid.len(), 2);
    assert_eq!(value(&grid, 0, 0), Some(CellValue::from("学校名称")));
    assert_eq!(value(&grid, 0, 1), Some(CellValue::from("位次差")));
    assert_eq!(value(&grid, 1, 0), Some(CellValue::from("清华大学")));
    assert_eq!(value(&grid, 1, 1), Some(CellValue::Number(1200.0)));
}

#[test]
fn test_booleans_and_literals() {
    let bytes = XlsxBuilder::new()
        .sheet(
            "Sheet1",
            SheetXml::new().row(
                1,
                vec![
                    CellXml::boolean("A1", true),
                    CellXml::boolean("B1", false),
                    CellXml::raw("C1", "12abc"),
                    CellXml::raw("D1", "0.25"),
                    CellXml::blank("E1"),
                ],
            ),
        )
        .build();

    let grid = XlsxReader::read_first_sheet(&bytes).unwrap();
    assert_eq!(value(&grid, 0, 0), Some(CellValue::Boolean(true)));
    assert_eq!(value(&grid, 0, 1), Some(CellValue::Boolean(false)));
    assert_eq!(value(&grid, 0, 2), Some(CellValue::from("12abc")));
    assert_eq!(value(&grid, 0, 3), Some(CellValue::Number(0.25)));
    assert_eq!(value(&grid, 0, 4), Some(CellValue::from("")));
}

#[test]
fn test_shared_string_out_of_range() {
    let bytes = XlsxBuilder::new()
        .shared_strings(&["a", "b", "c"])
        .sheet("Sheet1", SheetXml::new().row(1, vec![CellXml::shared("A1", 99)]))
        .build();

    let grid = XlsxReader::read_first_sheet(&bytes).unwrap();
    assert_eq!(value(&grid, 0, 0), Some(CellValue::from("")));
}

#[test]
fn test_sparse_cells_keep_positions() {
    let bytes = XlsxBuilder::new()
        .sheet(
            "Sheet1",
            SheetXml::new()
                .row(1, vec![CellXml::inline("A1", "h1"), CellXml::inline("D1", "h4")])
                .row(5, vec![CellXml::number("AA5", 1.0)]),
        )
        .build();

    let grid = XlsxReader::read_first_sheet(&bytes).unwrap();
    let header = grid.header_row().unwrap();
    assert_eq!(header.len(), 2);
    assert_eq!(header.last_column(), Some(3));
    assert_eq!(value(&grid, 4, 26), Some(CellValue::Number(1.0)));
}
