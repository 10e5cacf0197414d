//! CSV options

/// Options for reading delimited text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvReadOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Turn fields that parse as finite numbers into numeric values
    /// (default: off, every value is text)
    pub auto_detect_types: bool,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            auto_detect_types: false,
        }
    }
}

impl CsvReadOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enable or disable numeric type detection
    pub fn with_auto_detect_types(mut self, enabled: bool) -> Self {
        self.auto_detect_types = enabled;
        self
    }
}
