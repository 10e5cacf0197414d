//! # sheetsift-xlsx
//!
//! XLSX (Office Open XML) reader for sheetsift.
//!
//! The package is decoded without a ZIP or XML library: [`container`] walks
//! the archive directory, [`inflate`] decodes entry data, [`xml`] builds a
//! small arena document, and the remaining modules turn the spreadsheet parts
//! into a [`sheetsift_core::SheetGrid`].

pub mod cell;
pub mod container;
pub mod error;
pub mod inflate;
pub mod reader;
pub mod shared_strings;
pub mod styles;
pub mod theme;
pub mod xml;

pub use container::{read_entry, ArchiveEntry, ZipContainer};
pub use error::{XlsxError, XlsxResult, XmlError, XmlResult};
pub use reader::XlsxReader;
pub use shared_strings::SharedStrings;
pub use styles::StyleSheet;
pub use xml::{NodeId, XmlDocument};
