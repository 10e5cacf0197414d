//! # sheetsift
//!
//! Extract a typed, styled table from spreadsheet bytes.
//!
//! The input format is decided from the bytes themselves: an XLSX container
//! is unpacked and its first worksheet decoded with values and styles, comma
//! separated text is read without styles, and a legacy `.xls` workbook is
//! rejected. The first row names the attributes; an [`AttributeSchema`]
//! decides which of them lead the output in a fixed order.
//!
//! ## Example
//!
//! ```rust
//! use sheetsift::{parse_spreadsheet_with, AttributeSchema, CellValue};
//!
//! let schema = AttributeSchema::new(["Name", "Code"], ["Code"]).unwrap();
//! let table = parse_spreadsheet_with(b"Note,Code,Name\nhi,7,Alpha\n,,\n", &schema).unwrap();
//!
//! assert_eq!(table.headers, vec!["Name", "Code", "Note"]);
//! assert_eq!(table.total_rows, 1);
//! assert_eq!(table.rows[0].get("Name").unwrap().value, CellValue::from("Alpha"));
//! ```

pub mod assembler;
pub mod config;
pub mod error;
pub mod prelude;
pub mod sniff;

pub use assembler::assemble;
pub use config::{AttributeSchema, FIXED_ATTRIBUTES, NO_LABEL_ATTRIBUTES};
pub use error::{Error, ErrorKind, Result};
pub use sniff::{is_supported_file_name, sniff, FileKind};

// Re-export core types
pub use sheetsift_core::{
    column_to_letters, letters_to_column, Alignment, BorderEdge, BorderLineStyle, BorderStyle,
    Cell, CellAddress, CellStyle, CellValue, Color, FillStyle, FillType, FontStyle, GridRow,
    HorizontalAlignment, ParsedTable, SheetGrid, SourceCell, TableRow, ThemePalette,
    VerticalAlignment,
};

// Re-export reader types
pub use sheetsift_csv::{CsvError, CsvReadOptions, CsvReader};
pub use sheetsift_xlsx::{XlsxError, XlsxReader};

use log::debug;

/// Everything that can be tuned about a parse
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Fixed and no-label attributes
    pub schema: AttributeSchema,
    /// Delimited text settings, ignored for XLSX input
    pub csv: CsvReadOptions,
}

impl ParseOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom attribute schema
    pub fn with_schema(mut self, schema: AttributeSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Use custom delimited text settings
    pub fn with_csv(mut self, csv: CsvReadOptions) -> Self {
        self.csv = csv;
        self
    }
}

/// Parse spreadsheet bytes with the default schema
pub fn parse_spreadsheet(bytes: &[u8]) -> Result<ParsedTable> {
    parse_with_options(bytes, &ParseOptions::default())
}

/// Parse spreadsheet bytes with a custom schema
pub fn parse_spreadsheet_with(bytes: &[u8], schema: &AttributeSchema) -> Result<ParsedTable> {
    let options = ParseOptions::new().with_schema(schema.clone());
    parse_with_options(bytes, &options)
}

/// Parse spreadsheet bytes
pub fn parse_with_options(bytes: &[u8], options: &ParseOptions) -> Result<ParsedTable> {
    let grid = read_grid_with(bytes, &options.csv)?;
    let table = assemble(&grid, &options.schema)?;
    debug!(
        "parsed {} rows, {} attributes",
        table.total_rows,
        table.headers.len()
    );
    Ok(table)
}

/// Read the first sheet into a grid without assembling it
pub fn read_grid(bytes: &[u8]) -> Result<SheetGrid> {
    read_grid_with(bytes, &CsvReadOptions::default())
}

fn read_grid_with(bytes: &[u8], csv: &CsvReadOptions) -> Result<SheetGrid> {
    match sniff(bytes)? {
        FileKind::Container => Ok(XlsxReader::read_first_sheet(bytes)?),
        FileKind::DelimitedText => Ok(CsvReader::read(bytes, csv)?),
        FileKind::LegacyBinary => Err(Error::UnsupportedFormat(
            "legacy .xls workbooks are not supported, save as .xlsx".into(),
        )),
    }
}
