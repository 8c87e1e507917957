// ==========================================
// Station Registry - import error types
// ==========================================

use crate::repository::RepositoryError;
use thiserror::Error;

/// Bulk-import error type.
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== file-level errors =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file format: {0} (expected .xlsx/.xls/.csv)")]
    UnsupportedFormat(String),

    #[error("CSV parse failed: {0}")]
    CsvParse(String),

    #[error("Excel parse failed: {0}")]
    ExcelParse(String),

    // ===== store errors =====
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ImportResult<T> = Result<T, ImportError>;
