// ==========================================
// Test helpers
// ==========================================
// Scratch database creation and draft builders shared by the
// integration tests.
// ==========================================

#![allow(dead_code)]

use rusqlite::Connection;
use station_registry::domain::types::{Region, StationStatus, StationType};
use station_registry::domain::{EmployeeDraft, StationDraft};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// Create a temp database with the registry schema.
///
/// Returns the NamedTempFile (keep it alive for the test's duration)
/// and the path.
pub fn create_test_db() -> (NamedTempFile, String) {
    let temp_file = NamedTempFile::new().expect("failed to create temp db file");
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = station_registry::db::open_connection(&db_path).expect("failed to open test db");
    station_registry::db::init_schema(&conn).expect("failed to init schema");

    (temp_file, db_path)
}

/// Open a shared connection to a test database.
pub fn shared_connection(db_path: &str) -> Arc<Mutex<Connection>> {
    let conn = station_registry::db::open_connection(db_path).expect("failed to open test db");
    Arc::new(Mutex::new(conn))
}

pub fn employee_draft(tabel: &str) -> EmployeeDraft {
    EmployeeDraft {
        tabel_number: tabel.to_string(),
        last_name: "Rahimov".to_string(),
        first_name: "Karim".to_string(),
        patronymic: "S.".to_string(),
        region: Region::Rrp,
        hire_date: "2019-03-12".to_string(),
        position: "engineer".to_string(),
        phone: "+992900000001".to_string(),
        contract_no: "C-17".to_string(),
        pdf_path: None,
        photo_path: None,
    }
}

pub fn station_draft(name: &str, region: Region) -> StationDraft {
    StationDraft {
        name: name.to_string(),
        location: "ridge site".to_string(),
        station_type: StationType::Base,
        frequency: "145.500".to_string(),
        power: "50W".to_string(),
        status: StationStatus::Active,
        region,
        contact: "+992900000002".to_string(),
        notes: String::new(),
        pdf_path: None,
        photo_path: None,
    }
}
