//! CSV reader

use log::debug;
use sheetsift_core::{CellValue, GridRow, SheetGrid, SourceCell};

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;

/// Delimited text reader
pub struct CsvReader;

impl CsvReader {
    /// Read delimited text into a grid
    ///
    /// Records are numbered from 0 in order, skipping blank lines; every
    /// field is trimmed. Record lengths may vary.
    pub fn read(bytes: &[u8], options: &CsvReadOptions) -> CsvResult<SheetGrid> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        std::str::from_utf8(bytes).map_err(|e| CsvError::Encoding {
            offset: e.valid_up_to(),
        })?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(bytes);

        let mut grid = SheetGrid::new();
        let mut row_idx = 0u32;

        for result in csv_reader.records() {
            let record = result?;

            // A whitespace-only line trims down to one empty field
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }

            let mut row = GridRow::new(row_idx);
            for (col, field) in record.iter().enumerate() {
                let value = if options.auto_detect_types {
                    Self::detect_type(field)
                } else {
                    CellValue::string(field)
                };
                row.insert(col as u32, SourceCell::new(value));
            }

            grid.push_row(row);
            row_idx += 1;
        }

        debug!("read {} delimited records", row_idx);
        Ok(grid)
    }

    /// Detect the type of a field value
    fn detect_type(field: &str) -> CellValue {
        match field.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::string(field),
        }
    }
}
