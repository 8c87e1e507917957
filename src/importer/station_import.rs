// ==========================================
// Station Registry - bulk station import
// ==========================================
// Tabular input (CSV or first Excel worksheet) mapped column-by-column
// onto station drafts. Defaulting rules:
//   - blank region  -> location-keyword hints, then RRP
//   - blank type    -> BASE
//   - blank status  -> ACTIVE
//   - blank name    -> row skipped
//   - existing name -> row skipped, never overwritten
// A bad row is counted and logged; the run keeps going unless the
// store itself becomes unavailable.
// ==========================================

use crate::domain::station::StationDraft;
use crate::domain::types::{Region, StationStatus, StationType};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{parse_csv, parse_xlsx, RawRow};
use crate::repository::{RepositoryError, StationRepository};
use serde::{Deserialize, Serialize};
use std::path::Path;

// CSV header names
const COL_NAME: &str = "name";
const COL_LOCATION: &str = "location";
const COL_TYPE: &str = "type";
const COL_FREQUENCY: &str = "frequency";
const COL_POWER: &str = "power";
const COL_STATUS: &str = "status";
const COL_CONTACT: &str = "contact";
const COL_NOTES: &str = "notes";
const COL_REGION: &str = "region";

// Excel header names (site survey sheet layout)
const XL_NUMBER: &str = "number";
const XL_NAME: &str = "name";
const XL_FREQUENCY_INFO: &str = "frequency_info";
const XL_REGION: &str = "region";
const XL_TYPE: &str = "type";
const XL_LOCATION: &str = "location";

/// Outcome counters for one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Bulk station importer.
pub struct StationImporter {
    stations: StationRepository,
    /// location-keyword -> region fallbacks, checked case-insensitively
    /// when a row has no region of its own.
    region_hints: Vec<(String, Region)>,
}

impl StationImporter {
    pub fn new(stations: StationRepository) -> Self {
        Self {
            stations,
            region_hints: Vec::new(),
        }
    }

    pub fn with_region_hints(mut self, hints: Vec<(String, Region)>) -> Self {
        self.region_hints = hints;
        self
    }

    /// Dispatch by file extension.
    pub fn import_file(&self, path: &Path) -> ImportResult<ImportSummary> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "csv" => self.import_csv(path),
            "xlsx" | "xls" => self.import_xlsx(path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn import_csv(&self, path: &Path) -> ImportResult<ImportSummary> {
        let rows = parse_csv(path)?;
        tracing::info!(file = %path.display(), rows = rows.len(), "CSV station import started");
        self.import_rows(rows, |row, hints| csv_row_to_draft(row, hints))
    }

    pub fn import_xlsx(&self, path: &Path) -> ImportResult<ImportSummary> {
        let rows = parse_xlsx(path)?;
        tracing::info!(file = %path.display(), rows = rows.len(), "Excel station import started");
        self.import_rows(rows, |row, _hints| excel_row_to_draft(row))
    }

    fn import_rows<F>(&self, rows: Vec<RawRow>, to_draft: F) -> ImportResult<ImportSummary>
    where
        F: Fn(&RawRow, &[(String, Region)]) -> Option<StationDraft>,
    {
        let mut summary = ImportSummary::default();

        for (idx, row) in rows.iter().enumerate() {
            let Some(draft) = to_draft(row, &self.region_hints) else {
                tracing::warn!(row = idx + 2, "skipping row without a station name");
                summary.skipped += 1;
                continue;
            };

            match self.stations.exists(&draft.name, None) {
                Ok(true) => {
                    tracing::info!(name = %draft.name, "station already exists, skipping");
                    summary.skipped += 1;
                    continue;
                }
                Ok(false) => {}
                Err(e @ RepositoryError::StoreUnavailable(_)) => return Err(e.into()),
                Err(e) => {
                    tracing::warn!(row = idx + 2, error = %e, "existence check failed");
                    summary.errors += 1;
                    continue;
                }
            }

            match self.stations.add(&draft) {
                Ok(_) => {
                    tracing::info!(name = %draft.name, region = %draft.region, "station imported");
                    summary.imported += 1;
                }
                // lost the race against a concurrent writer: same as the
                // duplicate-skip above
                Err(RepositoryError::DuplicateKey(_)) => summary.skipped += 1,
                Err(e @ RepositoryError::StoreUnavailable(_)) => return Err(e.into()),
                Err(e) => {
                    tracing::warn!(row = idx + 2, error = %e, "station insert failed");
                    summary.errors += 1;
                }
            }
        }

        tracing::info!(
            imported = summary.imported,
            skipped = summary.skipped,
            errors = summary.errors,
            "station import finished"
        );
        Ok(summary)
    }
}

fn field<'a>(row: &'a RawRow, key: &str) -> &'a str {
    row.get(key).map(String::as_str).unwrap_or("")
}

/// Resolve a row's region: explicit value, then location-keyword hints,
/// then the fixed default.
fn resolve_region(raw: &str, location: &str, hints: &[(String, Region)]) -> Region {
    if !raw.is_empty() {
        return Region::from_db_str(raw);
    }
    let location_lower = location.to_lowercase();
    for (keyword, region) in hints {
        if location_lower.contains(&keyword.to_lowercase()) {
            return region.clone();
        }
    }
    Region::Rrp
}

/// Map one CSV row onto a draft. None when the name is blank.
pub fn csv_row_to_draft(row: &RawRow, hints: &[(String, Region)]) -> Option<StationDraft> {
    let name = field(row, COL_NAME).trim();
    if name.is_empty() {
        return None;
    }

    let location = field(row, COL_LOCATION);
    let raw_type = field(row, COL_TYPE);
    let raw_status = field(row, COL_STATUS);

    Some(StationDraft {
        name: name.to_string(),
        location: location.to_string(),
        station_type: if raw_type.is_empty() {
            StationType::Base
        } else {
            StationType::from_db_str(raw_type)
        },
        frequency: field(row, COL_FREQUENCY).to_string(),
        power: field(row, COL_POWER).to_string(),
        status: if raw_status.is_empty() {
            StationStatus::Active
        } else {
            StationStatus::from_db_str(raw_status)
        },
        region: resolve_region(field(row, COL_REGION), location, hints),
        contact: field(row, COL_CONTACT).to_string(),
        notes: field(row, COL_NOTES).to_string(),
        pdf_path: None,
        photo_path: None,
    })
}

/// Map one Excel site-survey row onto a draft. None when the name is
/// blank. Notes are synthesized from the record-number tag and the
/// secondary frequency info when present.
pub fn excel_row_to_draft(row: &RawRow) -> Option<StationDraft> {
    let name = field(row, XL_NAME).trim();
    if name.is_empty() {
        return None;
    }

    let number = field(row, XL_NUMBER);
    let frequency_info = field(row, XL_FREQUENCY_INFO);
    let raw_region = field(row, XL_REGION);
    let raw_type = field(row, XL_TYPE);

    let mut notes_parts: Vec<String> = Vec::new();
    if !number.is_empty() {
        notes_parts.push(format!("#{number}"));
    }
    if !frequency_info.is_empty() {
        notes_parts.push(frequency_info.to_string());
    }

    Some(StationDraft {
        name: name.to_string(),
        location: field(row, XL_LOCATION).to_string(),
        station_type: if raw_type.is_empty() {
            StationType::Base
        } else {
            StationType::from_db_str(raw_type)
        },
        frequency: frequency_info.to_string(),
        power: String::new(),
        status: StationStatus::Active,
        region: if raw_region.is_empty() {
            Region::Rrp
        } else {
            Region::from_db_str(raw_region)
        },
        contact: String::new(),
        notes: notes_parts.join(" | "),
        pdf_path: None,
        photo_path: None,
    })
}
