//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The typed value of a cell
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`column_to_letters`] / [`letters_to_column`] - Column-letter conversion

mod address;
mod value;

pub use address::{column_to_letters, letters_to_column, CellAddress, MAX_COLUMN};
pub use value::CellValue;
