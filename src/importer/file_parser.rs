// ==========================================
// Station Registry - tabular file parsing
// ==========================================
// CSV and Excel files both flatten to header-keyed row maps; the
// mapping layer on top never cares which format the data came from.
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// One parsed row, keyed by trimmed header name.
pub type RawRow = HashMap<String, String>;

/// Parse a CSV file with a header row. Rows that are entirely blank are
/// skipped; rows shorter or longer than the header are tolerated.
pub fn parse_csv(path: &Path) -> ImportResult<Vec<RawRow>> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let file = File::open(path).map_err(|e| ImportError::CsvParse(e.to_string()))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ImportError::CsvParse(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| ImportError::CsvParse(e.to_string()))?;
        let mut row = RawRow::new();
        for (col_idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                row.insert(header.clone(), value.trim().to_string());
            }
        }
        if row.values().all(|v| v.is_empty()) {
            continue;
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Parse the first worksheet of an .xlsx file; the first row is the
/// header.
pub fn parse_xlsx(path: &Path) -> ImportResult<Vec<RawRow>> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e: calamine::XlsxError| ImportError::ExcelParse(e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = sheet_names
        .first()
        .cloned()
        .ok_or_else(|| ImportError::ExcelParse("workbook has no worksheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ImportError::ExcelParse(e.to_string()))?;

    let mut sheet_rows = range.rows();
    let header_row = sheet_rows
        .next()
        .ok_or_else(|| ImportError::ExcelParse("worksheet has no rows".to_string()))?;

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for data_row in sheet_rows {
        let mut row = RawRow::new();
        for (col_idx, cell) in data_row.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                row.insert(header.clone(), cell.to_string().trim().to_string());
            }
        }
        if row.values().all(|v| v.is_empty()) {
            continue;
        }
        rows.push(row);
    }

    Ok(rows)
}
