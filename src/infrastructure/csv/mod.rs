// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Record-level CSV reading for uploaded name lists

mod csv_parser;

pub use csv_parser::CsvParser;
