// ==========================================
// Station Registry - API layer
// ==========================================
// One struct per surface, owning its repositories. Validation, the
// advisory uniqueness pre-check and role gating happen here, before
// any store access.
// ==========================================

pub mod employee_api;
pub mod error;
pub mod maintenance_api;
pub mod report_api;
pub mod station_api;

pub use employee_api::EmployeeApi;
pub use error::{ApiError, ApiResult};
pub use maintenance_api::MaintenanceApi;
pub use report_api::ReportApi;
pub use station_api::StationApi;
