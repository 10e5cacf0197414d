//! End-to-end tests for sheetsift-xlsx.
//!
//! Each test builds the exact package it needs in memory with the `zip`
//! crate, then reads it back with `XlsxReader` and asserts on the grid.

mod common;
mod reading;

// Re-export common utilities for submodules
pub use common::*;
