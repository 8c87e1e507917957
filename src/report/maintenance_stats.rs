// ==========================================
// Station Registry - maintenance aggregator
// ==========================================
// Read-side computation over the maintenance journal plus the one
// write path (record_event). Repositories stay free of business
// logic; the grouping/bucketing rules live here.
// ==========================================

use crate::domain::maintenance::{
    DailyStats, MaintenanceLogEntry, NewMaintenanceRecord, RegionDailyStats,
};
use crate::domain::types::{MaintenanceType, Region, RegionFilter};
use crate::repository::{MaintenanceRepository, RepositoryError, RepositoryResult, StationRepository};
use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;

/// Maintenance statistics component.
///
/// Region attribution note: `stats_by_region` and the region filter of
/// `records_for` join each record to the station's *current* region. A
/// station moved after the event is reported under its new region; the
/// record keeps no region of its own.
pub struct MaintenanceAggregator {
    records: MaintenanceRepository,
    stations: StationRepository,
}

impl MaintenanceAggregator {
    pub fn new(records: MaintenanceRepository, stations: StationRepository) -> Self {
        Self { records, stations }
    }

    /// Append one journal row per event type, dated with today's local
    /// calendar day and annotated with the type's fixed note.
    ///
    /// The station must exist at creation time. Repeated calls on the
    /// same day accumulate rows; the journal never dedups.
    pub fn record_event(
        &self,
        station_id: i64,
        types: &[MaintenanceType],
        parts_replaced: &str,
        user_label: &str,
    ) -> RepositoryResult<Vec<i64>> {
        if self.stations.find_by_id(station_id)?.is_none() {
            return Err(RepositoryError::NotFound {
                entity: "station",
                id: station_id,
            });
        }

        let today = Local::now().date_naive();
        let mut ids = Vec::with_capacity(types.len());
        for record_type in types {
            let record = NewMaintenanceRecord {
                station_id,
                date: today,
                record_type: record_type.clone(),
                parts_replaced: parts_replaced.to_string(),
                notes: record_type.event_annotation().to_string(),
                user_label: user_label.to_string(),
            };
            let id = self.records.insert(&record)?;
            tracing::info!(
                station_id,
                record_id = id,
                kind = %record_type,
                by = user_label,
                "maintenance event recorded"
            );
            ids.push(id);
        }
        Ok(ids)
    }

    /// Whole-journal statistics for one day.
    ///
    /// A station serviced with both types counts once toward
    /// stations_serviced and contributes to both type counters.
    pub fn daily_stats(&self, date: NaiveDate) -> RepositoryResult<DailyStats> {
        self.records.stats_for_date(date)
    }

    /// Per-region statistics for one day, grouped by the station's
    /// current region.
    ///
    /// Every unrecognized raw region, plus records whose station is
    /// gone, folds into a single "Unknown" bucket ordered after the
    /// known regions. Distinct-station counts stay additive under the
    /// fold: each station carries exactly one raw region, and an
    /// orphaned record's station no longer exists in any live group.
    pub fn stats_by_region(
        &self,
        date: NaiveDate,
        region_filter: &RegionFilter,
    ) -> RepositoryResult<Vec<RegionDailyStats>> {
        let rows = self.records.region_stats_for_date(date)?;

        let mut buckets: BTreeMap<Region, DailyStats> = BTreeMap::new();
        for row in rows {
            let region = match row.raw_region.as_deref() {
                Some(raw) => Region::from_db_str(raw),
                None => Region::Unknown(String::new()),
            };
            let key = if region.is_known() {
                region
            } else {
                Region::Unknown(String::new())
            };
            let acc = buckets.entry(key).or_default();
            acc.stations_serviced += row.stations_serviced;
            acc.repair_count += row.repair_count;
            acc.service_count += row.service_count;
        }

        let result = buckets
            .into_iter()
            .filter(|(region, _)| region_filter.matches(region))
            .map(|(region, acc)| RegionDailyStats {
                region: region.bucket_label().to_string(),
                stations_serviced: acc.stations_serviced,
                repair_count: acc.repair_count,
                service_count: acc.service_count,
            })
            .collect();
        Ok(result)
    }

    /// Journal listing with optional filters (AND semantics), most
    /// recent first. Orphaned records flow through with no station
    /// name; a region filter excludes them (no current region to
    /// match).
    pub fn records_for(
        &self,
        date: Option<NaiveDate>,
        region_filter: &RegionFilter,
        station_id: Option<i64>,
    ) -> RepositoryResult<Vec<MaintenanceLogEntry>> {
        self.records
            .fetch_log(date, region_filter.as_db_str(), station_id)
    }
}
