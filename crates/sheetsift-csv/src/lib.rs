//! # sheetsift-csv
//!
//! Delimited-text reader for sheetsift. Produces an unstyled
//! [`sheetsift_core::SheetGrid`] whose first record is the header row.

mod error;
mod options;
mod reader;

pub use error::{CsvError, CsvResult};
pub use options::CsvReadOptions;
pub use reader::CsvReader;
