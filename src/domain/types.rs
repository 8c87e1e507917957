// ==========================================
// Station Registry - domain type definitions
// ==========================================
// Closed enumerations with an explicit Unknown(raw) fallback.
// The store persists the canonical uppercase form but never enforces
// membership: any string can come back from a future writer (imported
// data), and aggregation must bucket it instead of failing.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Region
// ==========================================
// Shared domain for employees and stations. The set grows over time
// (DUSHANBE arrived after the original four), which is why the schema
// stores plain TEXT and parsing falls back to Unknown.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    Rrp,
    Vmkb,
    Rukho,
    Ruso,
    Dushanbe,
    Unknown(String),
}

impl Region {
    /// The recognized regions, in listing order.
    pub const KNOWN: [Region; 5] = [
        Region::Rrp,
        Region::Vmkb,
        Region::Rukho,
        Region::Ruso,
        Region::Dushanbe,
    ];

    pub fn to_db_str(&self) -> &str {
        match self {
            Region::Rrp => "RRP",
            Region::Vmkb => "VMKB",
            Region::Rukho => "RUKHO",
            Region::Ruso => "RUSO",
            Region::Dushanbe => "DUSHANBE",
            Region::Unknown(raw) => raw,
        }
    }

    pub fn from_db_str(s: &str) -> Self {
        match s.trim() {
            "RRP" => Region::Rrp,
            "VMKB" => Region::Vmkb,
            "RUKHO" => Region::Rukho,
            "RUSO" => Region::Ruso,
            "DUSHANBE" => Region::Dushanbe,
            other => Region::Unknown(other.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Region::Unknown(_))
    }

    /// Histogram/stats label. Every unrecognized raw value lands in the
    /// single "Unknown" bucket.
    pub fn bucket_label(&self) -> &str {
        match self {
            Region::Unknown(_) => "Unknown",
            known => known.to_db_str(),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// Station type
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StationType {
    Base,
    Repeater,
    Satellite,
    Mobile,
    Unknown(String),
}

impl StationType {
    pub fn to_db_str(&self) -> &str {
        match self {
            StationType::Base => "BASE",
            StationType::Repeater => "REPEATER",
            StationType::Satellite => "SATELLITE",
            StationType::Mobile => "MOBILE",
            StationType::Unknown(raw) => raw,
        }
    }

    pub fn from_db_str(s: &str) -> Self {
        match s.trim() {
            "BASE" => StationType::Base,
            "REPEATER" => StationType::Repeater,
            "SATELLITE" => StationType::Satellite,
            "MOBILE" => StationType::Mobile,
            other => StationType::Unknown(other.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, StationType::Unknown(_))
    }

    pub fn bucket_label(&self) -> &str {
        match self {
            StationType::Unknown(_) => "Unknown",
            known => known.to_db_str(),
        }
    }
}

impl fmt::Display for StationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// Station status
// ==========================================
// A free label on the station, not derived from maintenance history.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StationStatus {
    Active,
    Inactive,
    UnderMaintenance,
    Reserve,
    Unknown(String),
}

impl StationStatus {
    pub fn to_db_str(&self) -> &str {
        match self {
            StationStatus::Active => "ACTIVE",
            StationStatus::Inactive => "INACTIVE",
            StationStatus::UnderMaintenance => "UNDER_MAINTENANCE",
            StationStatus::Reserve => "RESERVE",
            StationStatus::Unknown(raw) => raw,
        }
    }

    pub fn from_db_str(s: &str) -> Self {
        match s.trim() {
            "ACTIVE" => StationStatus::Active,
            "INACTIVE" => StationStatus::Inactive,
            "UNDER_MAINTENANCE" => StationStatus::UnderMaintenance,
            "RESERVE" => StationStatus::Reserve,
            other => StationStatus::Unknown(other.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, StationStatus::Unknown(_))
    }

    pub fn bucket_label(&self) -> &str {
        match self {
            StationStatus::Unknown(_) => "Unknown",
            known => known.to_db_str(),
        }
    }
}

impl fmt::Display for StationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// Maintenance type
// ==========================================
// Extensible: records written by other tools may carry types this code
// does not know; they count toward distinct-station stats but neither
// repair_count nor service_count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaintenanceType {
    Repair,
    Service,
    Unknown(String),
}

impl MaintenanceType {
    pub fn to_db_str(&self) -> &str {
        match self {
            MaintenanceType::Repair => "REPAIR",
            MaintenanceType::Service => "SERVICE",
            MaintenanceType::Unknown(raw) => raw,
        }
    }

    pub fn from_db_str(s: &str) -> Self {
        match s.trim() {
            "REPAIR" => MaintenanceType::Repair,
            "SERVICE" => MaintenanceType::Service,
            other => MaintenanceType::Unknown(other.to_string()),
        }
    }

    /// Fixed journal annotation written when an event of this type is
    /// recorded.
    pub fn event_annotation(&self) -> &str {
        match self {
            MaintenanceType::Repair => "Repair performed",
            MaintenanceType::Service => "Scheduled service",
            MaintenanceType::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for MaintenanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// Role
// ==========================================
// Two static roles; there is no finer authorization model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Viewer,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Viewer => "viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// Filters
// ==========================================

/// Region filter with the "All" sentinel (no filtering on the dimension).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionFilter {
    All,
    Only(Region),
}

impl RegionFilter {
    pub fn matches(&self, region: &Region) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Only(wanted) => wanted == region,
        }
    }

    /// The raw value to bind in SQL, None meaning no predicate.
    pub fn as_db_str(&self) -> Option<&str> {
        match self {
            RegionFilter::All => None,
            RegionFilter::Only(region) => Some(region.to_db_str()),
        }
    }
}

/// Status filter with the "All" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    All,
    Only(StationStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: &StationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_parse_falls_back_to_unknown() {
        assert_eq!(Region::from_db_str("RRP"), Region::Rrp);
        assert_eq!(Region::from_db_str(" DUSHANBE "), Region::Dushanbe);
        assert_eq!(
            Region::from_db_str("SUGHD"),
            Region::Unknown("SUGHD".to_string())
        );
        assert_eq!(Region::from_db_str(""), Region::Unknown(String::new()));
    }

    #[test]
    fn test_unknown_values_share_one_bucket() {
        assert_eq!(Region::Unknown("SUGHD".into()).bucket_label(), "Unknown");
        assert_eq!(Region::Unknown("".into()).bucket_label(), "Unknown");
        assert_eq!(Region::Vmkb.bucket_label(), "VMKB");
        assert_eq!(
            StationStatus::Unknown("broken".into()).bucket_label(),
            "Unknown"
        );
    }

    #[test]
    fn test_region_filter_sentinel() {
        assert!(RegionFilter::All.matches(&Region::Rrp));
        assert!(RegionFilter::All.matches(&Region::Unknown("x".into())));
        let only = RegionFilter::Only(Region::Vmkb);
        assert!(only.matches(&Region::Vmkb));
        assert!(!only.matches(&Region::Rrp));
        assert_eq!(only.as_db_str(), Some("VMKB"));
        assert_eq!(RegionFilter::All.as_db_str(), None);
    }
}
