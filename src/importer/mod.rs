// ==========================================
// Station Registry - import layer
// ==========================================
// External tabular data in, station rows out. Duplicate business keys
// are skipped, never overwritten.
// ==========================================

pub mod error;
pub mod file_parser;
pub mod station_import;

pub use error::{ImportError, ImportResult};
pub use file_parser::{parse_csv, parse_xlsx, RawRow};
pub use station_import::{csv_row_to_draft, excel_row_to_draft, ImportSummary, StationImporter};
