//! Tests for reading cell styles.

use crate::{CellXml, SheetXml, XlsxBuilder, STYLES_XML, THEME_XML};
use pretty_assertions::assert_eq;
use sheetsift_core::style::{
    BorderLineStyle, CellStyle, FillType, HorizontalAlignment, VerticalAlignment,
};
use sheetsift_core::SheetGrid;
use sheetsift_xlsx::XlsxReader;

fn styled_sheet() -> SheetXml {
    SheetXml::new().row(
        1,
        vec![
            CellXml::inline("A1", "plain"),
            CellXml::inline("B1", "default").with_style(0),
            CellXml::inline("C1", "loud").with_style(1),
            CellXml::inline("D1", "themed").with_style(2),
            CellXml::inline("E1", "dangling").with_style(7),
        ],
    )
}

fn style(grid: &SheetGrid, col: u32) -> Option<CellStyle> {
    grid.header_row()
        .and_then(|r| r.get(col))
        .and_then(|c| c.style.clone())
}

#[test]
fn test_style_only_with_s_attribute() {
    let bytes = XlsxBuilder::new()
        .styles(STYLES_XML)
        .sheet("Sheet1", styled_sheet())
        .build();
    let grid = XlsxReader::read_first_sheet(&bytes).unwrap();

    assert_eq!(style(&grid, 0), None);
    assert!(style(&grid, 1).is_some());
}

#[test]
fn test_explicit_formatting() {
    let bytes = XlsxBuilder::new()
        .styles(STYLES_XML)
        .theme(THEME_XML)
        .sheet("Sheet1", styled_sheet())
        .build();
    let grid = XlsxReader::read_first_sheet(&bytes).unwrap();
    let loud = style(&grid, 2).unwrap();

    assert!(loud.font.bold);
    assert!(!loud.font.italic);
    assert_eq!(loud.font.size, 12.0);
    assert_eq!(loud.font.name, "Arial");
    assert_eq!(loud.font.color, "#C00000");
    assert_eq!(loud.fill.fill_type, FillType::Solid);
    assert_eq!(loud.fill.color, "#FFFF00");

    assert_eq!(loud.border.left.style, BorderLineStyle::Thin);
    assert_eq!(loud.border.left.color, "#000080");
    // Indexed colors are not resolved
    assert_eq!(loud.border.right.color, "#000000");
    assert_eq!(loud.border.top.style, BorderLineStyle::Thick);
    assert_eq!(loud.border.top.color, "#A5A5A5");
    assert_eq!(loud.border.bottom.style, BorderLineStyle::Double);

    assert_eq!(loud.alignment.horizontal, HorizontalAlignment::Center);
    assert_eq!(loud.alignment.vertical, VerticalAlignment::Center);
    assert!(loud.alignment.wrap_text);
}

#[test]
fn test_theme_colors_use_package_theme() {
    let theme = THEME_XML
        .replace("5B9BD5", "010203")
        .replace("4472C4", "0A0B0C");
    let bytes = XlsxBuilder::new()
        .styles(STYLES_XML)
        .theme(&theme)
        .sheet("Sheet1", styled_sheet())
        .build();
    let grid = XlsxReader::read_first_sheet(&bytes).unwrap();
    let themed = style(&grid, 3).unwrap();

    assert!(themed.font.italic);
    assert!(themed.font.underline);
    assert_eq!(themed.font.name, "等线");
    // theme 4 -> accent5, theme 0 -> accent1
    assert_eq!(themed.font.color, "#010203");
    assert_eq!(themed.fill.color, "#0A0B0C");
}

#[test]
fn test_theme_colors_without_theme_use_fallback_palette() {
    let bytes = XlsxBuilder::new()
        .styles(STYLES_XML)
        .sheet("Sheet1", styled_sheet())
        .build();

    for _ in 0..2 {
        let grid = XlsxReader::read_first_sheet(&bytes).unwrap();
        let themed = style(&grid, 3).unwrap();
        assert_eq!(themed.font.color, "#5B9BD5");
        assert_eq!(themed.fill.color, "#4472C4");
    }
}

#[test]
fn test_unknown_format_index_gives_defaults() {
    let bytes = XlsxBuilder::new()
        .styles(STYLES_XML)
        .sheet("Sheet1", styled_sheet())
        .build();
    let grid = XlsxReader::read_first_sheet(&bytes).unwrap();
    assert_eq!(style(&grid, 4), Some(CellStyle::default()));
}

#[test]
fn test_no_styles_part_gives_defaults() {
    let bytes = XlsxBuilder::new().sheet("Sheet1", styled_sheet()).build();
    let grid = XlsxReader::read_first_sheet(&bytes).unwrap();

    assert_eq!(style(&grid, 0), None);
    assert_eq!(style(&grid, 2), Some(CellStyle::default()));
    let default = style(&grid, 2).unwrap();
    assert_eq!(default.font.color, "#000000");
    assert_eq!(default.fill.color, "#FFFFFF");
    assert_eq!(default.alignment.horizontal, HorizontalAlignment::Left);
}
