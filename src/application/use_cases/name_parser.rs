// ============================================================
// NAME PARSER USE CASE
// ============================================================
// Turn uploaded bytes into a NameList

use tracing::debug;

use crate::domain::error::Result;
use crate::domain::{NameList, SourceFormat};
use crate::infrastructure::csv::CsvParser;
use crate::infrastructure::encoding::decode_text;

/// Parses uploaded name files. Stateless apart from CSV reader settings.
#[derive(Default)]
pub struct NameParser {
    csv: CsvParser,
}

impl NameParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `content` and extract names according to `format`.
    pub fn parse(&self, content: &[u8], format: SourceFormat) -> Result<NameList> {
        let text = decode_text(content)?;

        let names = match format {
            SourceFormat::Csv => self.parse_csv(&text)?,
            SourceFormat::Lines => Self::parse_lines(&text)?,
        };

        debug!(
            format = %format,
            bytes = content.len(),
            total_names = names.len(),
            "Parsed name list"
        );

        Ok(names)
    }

    /// Every field of every record, in record-then-field order.
    fn parse_csv(&self, text: &str) -> Result<NameList> {
        let records = self.csv.parse_records(text)?;
        NameList::from_candidates(records.into_iter().flatten())
    }

    fn parse_lines(text: &str) -> Result<NameList> {
        NameList::from_candidates(text.split('\n'))
    }
}
