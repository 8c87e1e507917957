// ==========================================
// Attachment store integration tests
// ==========================================
// Collision handling and sanitization against a real directory.
// ==========================================

use station_registry::storage::{AttachmentKind, AttachmentStore, StorageError};
use tempfile::tempdir;

#[test]
fn test_same_hint_twice_yields_distinct_paths() {
    let dir = tempdir().unwrap();
    let store = AttachmentStore::new(dir.path());

    let first = store
        .store(AttachmentKind::Photo, "tower.jpg", b"first")
        .unwrap();
    let second = store
        .store(AttachmentKind::Photo, "tower.jpg", b"second")
        .unwrap();

    assert_eq!(first, "photos/tower.jpg");
    assert_eq!(second, "photos/tower_1.jpg");

    // neither upload overwrote the other
    assert_eq!(std::fs::read(store.absolute_path(&first)).unwrap(), b"first");
    assert_eq!(
        std::fs::read(store.absolute_path(&second)).unwrap(),
        b"second"
    );

    let third = store
        .store(AttachmentKind::Photo, "tower.jpg", b"third")
        .unwrap();
    assert_eq!(third, "photos/tower_2.jpg");
}

#[test]
fn test_kinds_use_separate_directories() {
    let dir = tempdir().unwrap();
    let store = AttachmentStore::new(dir.path());

    let photo = store
        .store(AttachmentKind::Photo, "doc.bin", b"p")
        .unwrap();
    let pdf = store.store(AttachmentKind::Pdf, "doc.bin", b"d").unwrap();

    assert_eq!(photo, "photos/doc.bin");
    assert_eq!(pdf, "pdfs/doc.bin");
}

#[test]
fn test_hostile_hint_is_sanitized() {
    let dir = tempdir().unwrap();
    let store = AttachmentStore::new(dir.path());

    let stored = store
        .store(AttachmentKind::Pdf, "../../etc/passwd копия.pdf", b"x")
        .unwrap();
    // path components are stripped, non-ASCII becomes underscores
    assert!(stored.starts_with("pdfs/"));
    assert!(!stored.contains(".."));
    assert!(store.absolute_path(&stored).starts_with(dir.path()));
}

#[test]
fn test_unwritable_root_reports_write_failure() {
    let dir = tempdir().unwrap();
    let bogus_root = dir.path().join("occupied");
    std::fs::write(&bogus_root, b"a plain file").unwrap();

    let store = AttachmentStore::new(&bogus_root);
    let err = store
        .store(AttachmentKind::Photo, "x.jpg", b"x")
        .unwrap_err();
    assert!(matches!(err, StorageError::DirUnavailable { .. }));
}
