mod support;

use mr_info::gitlab::MergeRequestState;
use mr_info::snapshot::{self, SnapshotError};
use std::path::PathBuf;
use support::at;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/snapshot.yaml")
}

#[test]
fn reads_fixture_with_optional_fields() {
    let map = snapshot::read(&fixture()).unwrap();

    assert_eq!(map.len(), 2);
    assert_eq!(map.merge_request_count(), 3);

    let infos = map.get("ABC-123").unwrap();
    assert_eq!(infos[0].tada_version.as_deref(), Some("1.4.0"));
    assert_eq!(infos[0].state, Some(MergeRequestState::Merged));
    assert_eq!(infos[0].merge_request_update_at, Some(at(10)));
    assert_eq!(infos[0].note_update_at, Some(at(11)));

    // Issue key is taken from the map key when omitted.
    assert_eq!(infos[1].issue, "ABC-123");
    assert_eq!(infos[1].tada_version, None);
    assert_eq!(infos[1].version_url, None);

    let docs = &map.get("XYZ-9").unwrap()[0];
    assert_eq!(docs.state, None);
}

#[test]
fn write_then_read_preserves_map() {
    let original = snapshot::read(&fixture()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mr-info.yaml");

    snapshot::write(&path, &original).unwrap();
    let restored = snapshot::read(&path).unwrap();

    assert_eq!(restored, original);
}

#[test]
fn rejects_entry_filed_under_other_issue() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(
        &path,
        "ABC-1:\n  - issue: ABC-2\n    url: https://gitlab.example.com/mr/1\n",
    )
    .unwrap();

    assert!(matches!(
        snapshot::read(&path),
        Err(SnapshotError::InconsistentEntry { .. })
    ));
}
