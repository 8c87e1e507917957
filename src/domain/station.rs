// ==========================================
// Station Registry - station entity
// ==========================================

use crate::domain::types::{Region, StationStatus, StationType};
use serde::{Deserialize, Serialize};

// ==========================================
// Station - stored row
// ==========================================
// Business key: name (unique among live rows).
// frequency and power stay free text; frequency may encode several bands
// ("2G, 3G, 4G (900/1800/2100)").
// notes is the one field a viewer may edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub station_type: StationType,
    pub frequency: String,
    pub power: String,
    pub status: StationStatus,
    pub region: Region,
    pub contact: String,
    pub notes: String,
    pub pdf_path: Option<String>,
    pub photo_path: Option<String>,
}

// ==========================================
// StationDraft - upsert payload
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationDraft {
    pub name: String,
    pub location: String,
    pub station_type: StationType,
    pub frequency: String,
    pub power: String,
    pub status: StationStatus,
    pub region: Region,
    pub contact: String,
    pub notes: String,
    pub pdf_path: Option<String>,
    pub photo_path: Option<String>,
}

impl StationDraft {
    /// A draft with the defaults the import pipeline uses for blank
    /// fields: BASE type, ACTIVE status, RRP region.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: String::new(),
            station_type: StationType::Base,
            frequency: String::new(),
            power: String::new(),
            status: StationStatus::Active,
            region: Region::Rrp,
            contact: String::new(),
            notes: String::new(),
            pdf_path: None,
            photo_path: None,
        }
    }
}

impl Station {
    pub fn to_draft(&self) -> StationDraft {
        StationDraft {
            name: self.name.clone(),
            location: self.location.clone(),
            station_type: self.station_type.clone(),
            frequency: self.frequency.clone(),
            power: self.power.clone(),
            status: self.status.clone(),
            region: self.region.clone(),
            contact: self.contact.clone(),
            notes: self.notes.clone(),
            pdf_path: self.pdf_path.clone(),
            photo_path: self.photo_path.clone(),
        }
    }
}
