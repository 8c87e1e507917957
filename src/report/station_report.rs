// ==========================================
// Station Registry - station report view-model
// ==========================================
// Pure aggregation over the full station set: histograms, the
// availability ratio and the filtered listing/export rows. No data
// access here; callers pass the fetched slice in.
// ==========================================

use crate::domain::station::Station;
use crate::domain::types::{Region, RegionFilter, StationStatus, StationType, StatusFilter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One histogram bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramBucket {
    pub label: String,
    pub count: i64,
}

/// Dashboard numbers over the whole station set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationOverview {
    pub total: i64,
    pub by_region: Vec<HistogramBucket>,
    pub by_type: Vec<HistogramBucket>,
    pub by_status: Vec<HistogramBucket>,
    /// active / total * 100, one decimal; 0.0 on an empty set.
    pub availability_pct: f64,
}

/// Fixed column subset for the on-screen table and the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationListingRow {
    pub name: String,
    pub location: String,
    pub station_type: String,
    pub frequency: String,
    pub power: String,
    pub status: String,
    pub region: String,
    pub contact: String,
}

impl StationListingRow {
    fn from_station(s: &Station) -> Self {
        Self {
            name: s.name.clone(),
            location: s.location.clone(),
            station_type: s.station_type.to_db_str().to_string(),
            frequency: s.frequency.clone(),
            power: s.power.clone(),
            status: s.status.to_db_str().to_string(),
            region: s.region.to_db_str().to_string(),
            contact: s.contact.clone(),
        }
    }
}

/// Availability percentage, rounded to one decimal. Defined as 0.0 for
/// an empty set (never divides by zero).
pub fn availability_pct(stations: &[Station]) -> f64 {
    if stations.is_empty() {
        return 0.0;
    }
    let active = stations
        .iter()
        .filter(|s| s.status == StationStatus::Active)
        .count();
    let pct = active as f64 / stations.len() as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

/// Build the full overview: three histograms plus availability.
pub fn build_overview(stations: &[Station]) -> StationOverview {
    StationOverview {
        total: stations.len() as i64,
        by_region: region_histogram(stations),
        by_type: type_histogram(stations),
        by_status: status_histogram(stations),
        availability_pct: availability_pct(stations),
    }
}

/// Count of stations per region; blank/unrecognized values share one
/// "Unknown" bucket, ordered after the known regions.
pub fn region_histogram(stations: &[Station]) -> Vec<HistogramBucket> {
    let mut counts: BTreeMap<Region, i64> = BTreeMap::new();
    for s in stations {
        let key = if s.region.is_known() {
            s.region.clone()
        } else {
            Region::Unknown(String::new())
        };
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(region, count)| HistogramBucket {
            label: region.bucket_label().to_string(),
            count,
        })
        .collect()
}

/// Count of stations per type, Unknown bucket included.
pub fn type_histogram(stations: &[Station]) -> Vec<HistogramBucket> {
    let mut counts: BTreeMap<StationType, i64> = BTreeMap::new();
    for s in stations {
        let key = if s.station_type.is_known() {
            s.station_type.clone()
        } else {
            StationType::Unknown(String::new())
        };
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(ty, count)| HistogramBucket {
            label: ty.bucket_label().to_string(),
            count,
        })
        .collect()
}

/// Count of stations per status, Unknown bucket included.
pub fn status_histogram(stations: &[Station]) -> Vec<HistogramBucket> {
    let mut counts: BTreeMap<StationStatus, i64> = BTreeMap::new();
    for s in stations {
        let key = if s.status.is_known() {
            s.status.clone()
        } else {
            StationStatus::Unknown(String::new())
        };
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(status, count)| HistogramBucket {
            label: status.bucket_label().to_string(),
            count,
        })
        .collect()
}

/// Apply the region/status filters (exact match or the All sentinel)
/// and project to the listing columns. Input order is preserved, so a
/// name-ordered fetch yields a name-ordered listing.
pub fn filter_listing(
    stations: &[Station],
    region_filter: &RegionFilter,
    status_filter: &StatusFilter,
) -> Vec<StationListingRow> {
    stations
        .iter()
        .filter(|s| region_filter.matches(&s.region))
        .filter(|s| status_filter.matches(&s.status))
        .map(StationListingRow::from_station)
        .collect()
}

/// Serialize listing rows as delimited text (CSV with a header row).
pub fn render_csv(rows: &[StationListingRow]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "name", "location", "type", "frequency", "power", "status", "region", "contact",
    ])?;
    for row in rows {
        writer.write_record([
            row.name.as_str(),
            row.location.as_str(),
            row.station_type.as_str(),
            row.frequency.as_str(),
            row.power.as_str(),
            row.status.as_str(),
            row.region.as_str(),
            row.contact.as_str(),
        ])?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
