// ============================================================
// CSV PARSER
// ============================================================
// Read headerless, ragged CSV content into raw records

use csv::{ReaderBuilder, StringRecord};

use crate::domain::error::AppError;

/// CSV record reader
///
/// Uploads carry no header row and rows may differ in length, so every
/// record is read as-is. Fields are returned untrimmed.
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse CSV content into records of raw field values
    pub fn parse_records(&self, content: &str) -> Result<Vec<Vec<String>>, AppError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let mut records = Vec::new();
        let mut record = StringRecord::new();
        let mut index = 0usize;

        loop {
            match reader.read_record(&mut record) {
                Ok(true) => {
                    records.push(record.iter().map(str::to_string).collect());
                    index += 1;
                }
                Ok(false) => break,
                Err(e) => {
                    return Err(AppError::InvalidFormat(format!(
                        "Error processing file: failed to parse CSV row {}: {}",
                        index + 1,
                        e
                    )))
                }
            }
        }

        Ok(records)
    }
}
