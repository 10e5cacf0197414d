//! # sheetsift-core
//!
//! Core data structures for the sheetsift spreadsheet extractor.
//!
//! This crate provides the types shared by the reader crates and the facade:
//! - [`CellValue`] - Typed cell values (strings, numbers, booleans)
//! - [`CellAddress`] - A1-style cell references and column-letter conversion
//! - [`CellStyle`] - Resolved cell formatting (font, fill, borders, alignment)
//! - [`SheetGrid`] - Format-neutral grid produced by the readers
//! - [`ParsedTable`] - The final table handed to consumers
//!
//! ## Example
//!
//! ```rust
//! use sheetsift_core::{column_to_letters, letters_to_column, CellAddress};
//!
//! assert_eq!(column_to_letters(27), "AB");
//! assert_eq!(letters_to_column("AB").unwrap(), 27);
//!
//! let addr: CellAddress = "C5".parse().unwrap();
//! assert_eq!((addr.row, addr.col), (4, 2));
//! ```

pub mod cell;
pub mod error;
pub mod grid;
pub mod style;
pub mod table;

// Re-exports for convenience
pub use cell::{column_to_letters, letters_to_column, CellAddress, CellValue, MAX_COLUMN};
pub use error::{Error, Result};
pub use grid::{GridRow, SheetGrid, SourceCell};
pub use table::{Cell, ParsedTable, TableRow};

// Re-export all style types for convenience
pub use style::{
    Alignment, BorderEdge, BorderLineStyle, BorderStyle, CellStyle, Color, FillStyle, FillType,
    FontStyle, HorizontalAlignment, ThemePalette, VerticalAlignment,
};
