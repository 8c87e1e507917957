// ==========================================
// Station Registry - maintenance API
// ==========================================
// Thin wrapper over the aggregator. Recording is open to both roles:
// the journal stamps the acting user's label, which only carries
// information if viewers (field technicians) can write too.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::context::RequestContext;
use crate::domain::maintenance::{DailyStats, MaintenanceLogEntry, RegionDailyStats};
use crate::domain::types::{MaintenanceType, RegionFilter};
use crate::report::MaintenanceAggregator;
use chrono::NaiveDate;

pub struct MaintenanceApi {
    aggregator: MaintenanceAggregator,
}

impl MaintenanceApi {
    pub fn new(aggregator: MaintenanceAggregator) -> Self {
        Self { aggregator }
    }

    /// Record one or more maintenance events against a station, dated
    /// today. The station must exist; the types set must be non-empty.
    pub fn record_event(
        &self,
        ctx: &RequestContext,
        station_id: i64,
        types: &[MaintenanceType],
        parts_replaced: &str,
    ) -> ApiResult<Vec<i64>> {
        if types.is_empty() {
            return Err(ApiError::Validation(
                "at least one maintenance type must be selected".into(),
            ));
        }
        Ok(self
            .aggregator
            .record_event(station_id, types, parts_replaced, &ctx.user_label)?)
    }

    pub fn daily_stats(&self, date: NaiveDate) -> ApiResult<DailyStats> {
        Ok(self.aggregator.daily_stats(date)?)
    }

    pub fn stats_by_region(
        &self,
        date: NaiveDate,
        region_filter: &RegionFilter,
    ) -> ApiResult<Vec<RegionDailyStats>> {
        Ok(self.aggregator.stats_by_region(date, region_filter)?)
    }

    pub fn records(
        &self,
        date: Option<NaiveDate>,
        region_filter: &RegionFilter,
        station_id: Option<i64>,
    ) -> ApiResult<Vec<MaintenanceLogEntry>> {
        Ok(self.aggregator.records_for(date, region_filter, station_id)?)
    }
}
