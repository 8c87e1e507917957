// ==========================================
// Report API integration tests
// ==========================================
// Histograms with the Unknown bucket, the availability boundary and
// the admin-gated export.
// ==========================================

mod test_helpers;

use station_registry::api::{ApiError, ReportApi};
use station_registry::domain::types::{Region, RegionFilter, StationStatus, StatusFilter};
use station_registry::domain::RequestContext;
use station_registry::repository::StationRepository;

fn build_api(db_path: &str) -> (ReportApi, StationRepository) {
    let conn = test_helpers::shared_connection(db_path);
    (
        ReportApi::new(StationRepository::from_connection(conn.clone())),
        StationRepository::from_connection(conn),
    )
}

#[test]
fn test_availability_on_empty_set_is_zero() {
    let (_tmp, db_path) = test_helpers::create_test_db();
    let (api, _stations) = build_api(&db_path);

    let overview = api.overview().unwrap();
    assert_eq!(overview.total, 0);
    assert_eq!(overview.availability_pct, 0.0);
    assert!(overview.by_region.is_empty());
}

#[test]
fn test_availability_one_of_three_active() {
    let (_tmp, db_path) = test_helpers::create_test_db();
    let (api, stations) = build_api(&db_path);

    stations
        .add(&test_helpers::station_draft("A", Region::Rrp))
        .unwrap();
    let mut b = test_helpers::station_draft("B", Region::Rrp);
    b.status = StationStatus::Inactive;
    stations.add(&b).unwrap();
    let mut c = test_helpers::station_draft("C", Region::Vmkb);
    c.status = StationStatus::UnderMaintenance;
    stations.add(&c).unwrap();

    let overview = api.overview().unwrap();
    assert_eq!(overview.total, 3);
    assert_eq!(overview.availability_pct, 33.3);
}

#[test]
fn test_histograms_include_unknown_bucket() {
    let (_tmp, db_path) = test_helpers::create_test_db();
    let (api, stations) = build_api(&db_path);

    stations
        .add(&test_helpers::station_draft("A", Region::Rrp))
        .unwrap();
    stations
        .add(&test_helpers::station_draft("B", Region::Unknown("SUGHD".into())))
        .unwrap();
    let mut c = test_helpers::station_draft("C", Region::Unknown(String::new()));
    c.status = StationStatus::Unknown("checking".into());
    stations.add(&c).unwrap();

    let overview = api.overview().unwrap();

    let region_labels: Vec<(&str, i64)> = overview
        .by_region
        .iter()
        .map(|b| (b.label.as_str(), b.count))
        .collect();
    // blank and unrecognized regions share one bucket, ordered last
    assert_eq!(region_labels, vec![("RRP", 1), ("Unknown", 2)]);

    let status_unknown = overview
        .by_status
        .iter()
        .find(|b| b.label == "Unknown")
        .unwrap();
    assert_eq!(status_unknown.count, 1);
}

#[test]
fn test_listing_filters_by_region_and_status() {
    let (_tmp, db_path) = test_helpers::create_test_db();
    let (api, stations) = build_api(&db_path);

    stations
        .add(&test_helpers::station_draft("Alpha", Region::Rrp))
        .unwrap();
    let mut beta = test_helpers::station_draft("Beta", Region::Vmkb);
    beta.status = StationStatus::Reserve;
    stations.add(&beta).unwrap();

    let all = api.listing(&RegionFilter::All, &StatusFilter::All).unwrap();
    assert_eq!(all.len(), 2);
    // fetch order (name ascending) carries through
    assert_eq!(all[0].name, "Alpha");

    let reserves = api
        .listing(
            &RegionFilter::All,
            &StatusFilter::Only(StationStatus::Reserve),
        )
        .unwrap();
    assert_eq!(reserves.len(), 1);
    assert_eq!(reserves[0].name, "Beta");

    let rrp_reserves = api
        .listing(
            &RegionFilter::Only(Region::Rrp),
            &StatusFilter::Only(StationStatus::Reserve),
        )
        .unwrap();
    assert!(rrp_reserves.is_empty());
}

#[test]
fn test_export_is_admin_only() {
    let (_tmp, db_path) = test_helpers::create_test_db();
    let (api, stations) = build_api(&db_path);

    stations
        .add(&test_helpers::station_draft("Alpha", Region::Rrp))
        .unwrap();

    let err = api
        .export_csv(
            &RequestContext::viewer(),
            &RegionFilter::All,
            &StatusFilter::All,
        )
        .unwrap_err();
    assert!(matches!(err, ApiError::PermissionDenied(_)));

    let text = api
        .export_csv(
            &RequestContext::admin(),
            &RegionFilter::All,
            &StatusFilter::All,
        )
        .unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "name,location,type,frequency,power,status,region,contact"
    );
    let data = lines.next().unwrap();
    assert!(data.starts_with("Alpha,"));
    assert!(data.contains("ACTIVE"));
    assert!(data.contains("RRP"));
}
