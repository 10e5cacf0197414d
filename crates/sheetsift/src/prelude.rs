//! Prelude module for convenient imports
//!
//! ```rust
//! use sheetsift::prelude::*;
//! ```

pub use crate::{
    parse_spreadsheet, parse_spreadsheet_with, parse_with_options, AttributeSchema, Cell,
    CellStyle, CellValue, Error, ErrorKind, FileKind, ParseOptions, ParsedTable, Result,
    TableRow,
};
