// ==========================================
// Station Registry - report API
// ==========================================
// Assembles the station report view-model. The serialized export is
// the one admin-gated read: it leaves the system, the on-screen
// listing does not.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::context::RequestContext;
use crate::domain::types::{RegionFilter, StatusFilter};
use crate::report::station_report::{self, StationListingRow, StationOverview};
use crate::repository::StationRepository;

pub struct ReportApi {
    stations: StationRepository,
}

impl ReportApi {
    pub fn new(stations: StationRepository) -> Self {
        Self { stations }
    }

    /// Histograms plus availability over the whole station set.
    pub fn overview(&self) -> ApiResult<StationOverview> {
        let all = self.stations.fetch("", &RegionFilter::All)?;
        Ok(station_report::build_overview(&all))
    }

    /// Filtered listing rows for the on-screen table.
    pub fn listing(
        &self,
        region_filter: &RegionFilter,
        status_filter: &StatusFilter,
    ) -> ApiResult<Vec<StationListingRow>> {
        let all = self.stations.fetch("", &RegionFilter::All)?;
        Ok(station_report::filter_listing(
            &all,
            region_filter,
            status_filter,
        ))
    }

    /// Delimited-text export of the filtered listing. Admin only.
    pub fn export_csv(
        &self,
        ctx: &RequestContext,
        region_filter: &RegionFilter,
        status_filter: &StatusFilter,
    ) -> ApiResult<String> {
        if !ctx.is_admin() {
            return Err(ApiError::PermissionDenied(
                "exporting the station listing requires the admin role".into(),
            ));
        }
        let rows = self.listing(region_filter, status_filter)?;
        station_report::render_csv(&rows).map_err(|e| ApiError::Internal(e.to_string()))
    }
}
