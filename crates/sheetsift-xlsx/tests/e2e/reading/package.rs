//! Tests for package structure: part lookup, relationships and corruption.

use crate::{CellXml, SheetXml, XlsxBuilder};
use pretty_assertions::assert_eq;
use sheetsift_core::CellValue;
use sheetsift_xlsx::{XlsxError, XlsxReader, ZipContainer};

fn marker_sheet(text: &str) -> SheetXml {
    SheetXml::new().row(1, vec![CellXml::inline("A1", text)])
}

fn first_value(bytes: &[u8]) -> CellValue {
    let grid = XlsxReader::read_first_sheet(bytes).unwrap();
    grid.header_row().unwrap().get(0).unwrap().value.clone()
}

#[test]
fn test_first_sheet_follows_workbook_order() {
    // The first listed sheet is stored as sheet2.xml
    let bytes = XlsxBuilder::new()
        .sheet("First", marker_sheet("first"))
        .sheet("Second", marker_sheet("second"))
        .build();
    assert_eq!(first_value(&bytes), CellValue::from("first"));
}

#[test]
fn test_missing_relationships_fall_back_to_sheet1() {
    let bytes = XlsxBuilder::new()
        .sheet("First", marker_sheet("first"))
        .sheet("Second", marker_sheet("second"))
        .without_workbook_rels()
        .build();
    assert_eq!(first_value(&bytes), CellValue::from("second"));
}

#[test]
fn test_stored_entries() {
    let bytes = XlsxBuilder::new()
        .stored()
        .sheet("Sheet1", marker_sheet("stored"))
        .build();
    assert_eq!(first_value(&bytes), CellValue::from("stored"));
}

#[test]
fn test_missing_workbook_is_required() {
    let bytes = XlsxBuilder::new()
        .without_workbook()
        .sheet("Sheet1", marker_sheet("x"))
        .build();
    assert!(matches!(
        XlsxReader::read_first_sheet(&bytes),
        Err(XlsxError::MissingRequiredEntry(name)) if name == "xl/workbook.xml"
    ));
}

#[test]
fn test_missing_worksheet_is_required() {
    let bytes = XlsxBuilder::new().without_workbook_rels().build();
    assert!(matches!(
        XlsxReader::read_first_sheet(&bytes),
        Err(XlsxError::MissingRequiredEntry(name)) if name == "xl/worksheets/sheet1.xml"
    ));
}

#[test]
fn test_corrupted_end_record() {
    let mut bytes = XlsxBuilder::new().sheet("Sheet1", marker_sheet("x")).build();
    let eocd = bytes
        .windows(4)
        .rposition(|w| w == [0x50, 0x4B, 0x05, 0x06])
        .unwrap();
    bytes[eocd + 3] = 0xFF;
    assert!(matches!(
        XlsxReader::read_first_sheet(&bytes),
        Err(XlsxError::CorruptArchive { .. })
    ));
}

#[test]
fn test_truncated_archive() {
    let bytes = XlsxBuilder::new().sheet("Sheet1", marker_sheet("x")).build();
    let truncated = &bytes[..bytes.len() / 2];
    assert!(matches!(
        XlsxReader::read_first_sheet(truncated),
        Err(XlsxError::CorruptArchive { .. })
    ));
}

#[test]
fn test_container_lists_package_parts() {
    let bytes = XlsxBuilder::new()
        .shared_strings(&["a"])
        .sheet("Sheet1", marker_sheet("x"))
        .build();
    let archive = ZipContainer::parse(&bytes).unwrap();
    let names: Vec<&str> = archive.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "[Content_Types].xml",
            "xl/workbook.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/worksheets/sheet1.xml",
            "xl/sharedStrings.xml",
        ]
    );
    assert!(archive
        .entries()
        .iter()
        .all(|e| e.compression_method == 8));
}

#[test]
fn test_malformed_sheet_xml() {
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    zip.start_file("xl/workbook.xml", options).unwrap();
    zip.write_all(b"<workbook><sheets/></workbook>").unwrap();
    zip.start_file("xl/worksheets/sheet1.xml", options).unwrap();
    zip.write_all(b"<worksheet><sheetData></worksheet>").unwrap();
    let bytes = zip.finish().unwrap().into_inner();

    assert!(matches!(
        XlsxReader::read_first_sheet(&bytes),
        Err(XlsxError::MalformedXml { part, .. }) if part == "xl/worksheets/sheet1.xml"
    ));
}
