// ==========================================
// Station API integration tests
// ==========================================
// The station surface mirrors the employee one; the deliberate
// difference under test here is the viewer-editable notes field.
// ==========================================

mod test_helpers;

use station_registry::api::{ApiError, StationApi};
use station_registry::domain::types::{Region, RegionFilter};
use station_registry::domain::RequestContext;
use station_registry::repository::StationRepository;
use station_registry::storage::AttachmentStore;
use tempfile::tempdir;

fn build_api(db_path: &str, attachment_root: &std::path::Path) -> StationApi {
    let repo = StationRepository::new(db_path).unwrap();
    StationApi::new(repo, AttachmentStore::new(attachment_root))
}

#[test]
fn test_viewer_may_edit_notes_but_nothing_else() {
    let (_tmp, db_path) = test_helpers::create_test_db();
    let dir = tempdir().unwrap();
    let api = build_api(&db_path, dir.path());

    let admin = RequestContext::admin();
    let viewer = RequestContext::viewer();

    let id = api
        .add(&admin, &test_helpers::station_draft("North-1", Region::Rrp))
        .unwrap();

    // notes: the one field a non-admin may change
    api.update_notes(&viewer, id, "access road snowed in")
        .unwrap();
    assert_eq!(
        api.get(id).unwrap().unwrap().notes,
        "access road snowed in"
    );

    // full update stays admin-only
    let draft = test_helpers::station_draft("North-1", Region::Vmkb);
    let err = api.update(&viewer, id, &draft).unwrap_err();
    assert!(matches!(err, ApiError::PermissionDenied(_)));

    // so does delete
    let err = api.delete(&viewer, id).unwrap_err();
    assert!(matches!(err, ApiError::PermissionDenied(_)));

    // and attachments
    let err = api
        .attach_photo(&viewer, id, "site.jpg", b"bytes")
        .unwrap_err();
    assert!(matches!(err, ApiError::PermissionDenied(_)));
}

#[test]
fn test_duplicate_station_name_rejected() {
    let (_tmp, db_path) = test_helpers::create_test_db();
    let dir = tempdir().unwrap();
    let api = build_api(&db_path, dir.path());
    let admin = RequestContext::admin();

    api.add(&admin, &test_helpers::station_draft("Ridge", Region::Rrp))
        .unwrap();
    let err = api
        .add(&admin, &test_helpers::station_draft("Ridge", Region::Vmkb))
        .unwrap_err();
    assert!(matches!(err, ApiError::DuplicateKey(_)));
    assert_eq!(api.list("", &RegionFilter::All).unwrap().len(), 1);
}

#[test]
fn test_blank_name_is_validation_error() {
    let (_tmp, db_path) = test_helpers::create_test_db();
    let dir = tempdir().unwrap();
    let api = build_api(&db_path, dir.path());

    let mut draft = test_helpers::station_draft("", Region::Rrp);
    draft.name = "  ".to_string();
    let err = api.add(&RequestContext::admin(), &draft).unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[test]
fn test_attach_pdf_updates_station_row() {
    let (_tmp, db_path) = test_helpers::create_test_db();
    let dir = tempdir().unwrap();
    let api = build_api(&db_path, dir.path());
    let admin = RequestContext::admin();

    let id = api
        .add(&admin, &test_helpers::station_draft("Pass-7", Region::Rukho))
        .unwrap();
    let stored = api
        .attach_pdf(&admin, id, "site passport.pdf", b"pdf-bytes")
        .unwrap();

    assert_eq!(stored, "pdfs/site_passport.pdf");
    assert_eq!(
        api.get(id).unwrap().unwrap().pdf_path.as_deref(),
        Some("pdfs/site_passport.pdf")
    );
}
