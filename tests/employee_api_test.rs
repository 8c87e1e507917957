// ==========================================
// Employee API integration tests
// ==========================================
// Role gating, validation, the uniqueness pre-check and attachment
// orchestration.
// ==========================================

mod test_helpers;

use station_registry::api::{ApiError, EmployeeApi};
use station_registry::domain::types::RegionFilter;
use station_registry::domain::RequestContext;
use station_registry::repository::EmployeeRepository;
use station_registry::storage::AttachmentStore;
use tempfile::tempdir;

fn build_api(db_path: &str, attachment_root: &std::path::Path) -> EmployeeApi {
    let repo = EmployeeRepository::new(db_path).unwrap();
    EmployeeApi::new(repo, AttachmentStore::new(attachment_root))
}

#[test]
fn test_viewer_cannot_mutate() {
    let (_tmp, db_path) = test_helpers::create_test_db();
    let dir = tempdir().unwrap();
    let api = build_api(&db_path, dir.path());

    let viewer = RequestContext::viewer();
    let err = api
        .add(&viewer, &test_helpers::employee_draft("T-001"))
        .unwrap_err();
    assert!(matches!(err, ApiError::PermissionDenied(_)));

    // nothing was written; the viewer can still read
    assert!(api.list("", &RegionFilter::All).unwrap().is_empty());
}

#[test]
fn test_blank_tabel_number_is_validation_error() {
    let (_tmp, db_path) = test_helpers::create_test_db();
    let dir = tempdir().unwrap();
    let api = build_api(&db_path, dir.path());

    let mut draft = test_helpers::employee_draft("   ");
    draft.tabel_number = "   ".to_string();
    let err = api.add(&RequestContext::admin(), &draft).unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert!(api.list("", &RegionFilter::All).unwrap().is_empty());
}

#[test]
fn test_add_trims_business_key() {
    let (_tmp, db_path) = test_helpers::create_test_db();
    let dir = tempdir().unwrap();
    let api = build_api(&db_path, dir.path());

    let mut draft = test_helpers::employee_draft("T-007");
    draft.tabel_number = "  T-007  ".to_string();
    let id = api.add(&RequestContext::admin(), &draft).unwrap();

    let row = api.get(id).unwrap().unwrap();
    assert_eq!(row.tabel_number, "T-007");
}

#[test]
fn test_duplicate_key_fast_fail() {
    let (_tmp, db_path) = test_helpers::create_test_db();
    let dir = tempdir().unwrap();
    let api = build_api(&db_path, dir.path());
    let admin = RequestContext::admin();

    api.add(&admin, &test_helpers::employee_draft("T-010"))
        .unwrap();
    let err = api
        .add(&admin, &test_helpers::employee_draft("T-010"))
        .unwrap_err();
    assert!(matches!(err, ApiError::DuplicateKey(_)));
    assert_eq!(api.list("", &RegionFilter::All).unwrap().len(), 1);
}

#[test]
fn test_update_keeps_own_key_and_rejects_taken_key() {
    let (_tmp, db_path) = test_helpers::create_test_db();
    let dir = tempdir().unwrap();
    let api = build_api(&db_path, dir.path());
    let admin = RequestContext::admin();

    let id_a = api.add(&admin, &test_helpers::employee_draft("T-020")).unwrap();
    api.add(&admin, &test_helpers::employee_draft("T-021"))
        .unwrap();

    // saving the record with its own unchanged key is fine
    let mut draft = test_helpers::employee_draft("T-020");
    draft.position = "senior engineer".to_string();
    api.update(&admin, id_a, &draft).unwrap();
    assert_eq!(api.get(id_a).unwrap().unwrap().position, "senior engineer");

    // taking another row's key is not
    draft.tabel_number = "T-021".to_string();
    let err = api.update(&admin, id_a, &draft).unwrap_err();
    assert!(matches!(err, ApiError::DuplicateKey(_)));
}

#[test]
fn test_attach_photo_stores_file_and_updates_row() {
    let (_tmp, db_path) = test_helpers::create_test_db();
    let dir = tempdir().unwrap();
    let api = build_api(&db_path, dir.path());
    let admin = RequestContext::admin();

    let id = api.add(&admin, &test_helpers::employee_draft("T-030")).unwrap();
    let stored = api
        .attach_photo(&admin, id, "portrait.jpg", b"jpeg-bytes")
        .unwrap();

    assert_eq!(stored, "photos/portrait.jpg");
    assert!(dir.path().join("photos/portrait.jpg").is_file());
    assert_eq!(
        api.get(id).unwrap().unwrap().photo_path.as_deref(),
        Some("photos/portrait.jpg")
    );
}

#[test]
fn test_attachment_failure_leaves_row_unchanged() {
    let (_tmp, db_path) = test_helpers::create_test_db();
    let dir = tempdir().unwrap();

    // point the store root at a plain file so the photos dir cannot be
    // created
    let bogus_root = dir.path().join("not-a-dir");
    std::fs::write(&bogus_root, b"occupied").unwrap();

    let repo = EmployeeRepository::new(&db_path).unwrap();
    let api = EmployeeApi::new(repo, AttachmentStore::new(&bogus_root));
    let admin = RequestContext::admin();

    let id = api.add(&admin, &test_helpers::employee_draft("T-040")).unwrap();
    let err = api
        .attach_pdf(&admin, id, "contract.pdf", b"pdf-bytes")
        .unwrap_err();
    assert!(matches!(err, ApiError::AttachmentWriteFailure(_)));

    // the row's pdf column must not have been touched
    assert_eq!(api.get(id).unwrap().unwrap().pdf_path, None);
}

#[test]
fn test_delete_then_update_reports_not_found() {
    let (_tmp, db_path) = test_helpers::create_test_db();
    let dir = tempdir().unwrap();
    let api = build_api(&db_path, dir.path());
    let admin = RequestContext::admin();

    let id = api.add(&admin, &test_helpers::employee_draft("T-050")).unwrap();
    api.delete(&admin, id).unwrap();

    // concurrently-deleted target: caller should refresh, not crash
    let err = api
        .update(&admin, id, &test_helpers::employee_draft("T-050"))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}
