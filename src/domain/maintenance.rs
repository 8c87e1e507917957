// ==========================================
// Station Registry - maintenance journal entities
// ==========================================
// The journal is append-only: repeated events for the same station on
// the same day accumulate as separate rows, it is not a current-state
// table.
// ==========================================

use crate::domain::types::{MaintenanceType, Region};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ==========================================
// MaintenanceRecord - stored row
// ==========================================
// station_id is not FK-enforced: deleting the station orphans the row,
// and queries must keep returning it with an unknown-station label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: i64,
    pub station_id: i64,
    pub date: NaiveDate,
    pub record_type: MaintenanceType,
    pub parts_replaced: String,
    pub notes: String,
    /// Acting user's display string (role label, not a true identity).
    pub user_label: String,
    pub created_at: NaiveDateTime,
}

// ==========================================
// NewMaintenanceRecord - insert payload
// ==========================================
// id and created_at are assigned by the repository at insert time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMaintenanceRecord {
    pub station_id: i64,
    pub date: NaiveDate,
    pub record_type: MaintenanceType,
    pub parts_replaced: String,
    pub notes: String,
    pub user_label: String,
}

// ==========================================
// MaintenanceLogEntry - record joined with its station
// ==========================================
// station_name/station_region are None for orphaned records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceLogEntry {
    pub record: MaintenanceRecord,
    pub station_name: Option<String>,
    pub station_region: Option<Region>,
}

impl MaintenanceLogEntry {
    /// Station label for rendering; orphans surface as a fixed marker
    /// instead of an error.
    pub fn station_label(&self) -> &str {
        self.station_name.as_deref().unwrap_or("(unknown station)")
    }
}

// ==========================================
// Aggregate shapes
// ==========================================

/// Per-day statistics over the whole journal.
///
/// A station serviced with both types on one day contributes to both
/// type counters but counts once toward stations_serviced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DailyStats {
    pub stations_serviced: i64,
    pub repair_count: i64,
    pub service_count: i64,
}

/// Per-day statistics grouped by the station's *current* region.
///
/// Attribution follows the region the station has now, not the region at
/// event time; records whose station is gone or carries an unrecognized
/// region fold into the single "Unknown" bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionDailyStats {
    pub region: String,
    pub stations_serviced: i64,
    pub repair_count: i64,
    pub service_count: i64,
}
