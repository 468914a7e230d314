//! Spec indexer integration tests
//!
//! Runs the indexer against real directories and checks the written index.

use std::fs;

use api_portal::error::IndexError;
use api_portal::indexer::{self, SpecMetadata, DEFAULT_ORDER};
use pretty_assertions::assert_eq;

use crate::common::{fixtures, sample_specs_dir, write_file};

fn ids(specs: &[SpecMetadata]) -> Vec<&str> {
    specs.iter().map(|s| s.id.as_str()).collect()
}

#[test]
fn test_one_entry_per_parsed_file() {
    let dir = sample_specs_dir();
    let report = indexer::collect(dir.path());

    assert_eq!(
        ids(&report.specs),
        vec!["10-users", "20-download", "visualization", "search"]
    );
    // "search" has no title, so it sorts by its id after "Visualization Plugin"
    assert_eq!(report.specs[3].title, "search");
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].file, "broken.yaml");
    assert!(matches!(report.skipped[0].error, IndexError::Parse { .. }));
}

#[test]
fn test_metadata_defaults_applied() {
    let dir = sample_specs_dir();
    let specs = indexer::index(dir.path());

    let download = specs.iter().find(|s| s.id == "20-download").unwrap();
    assert_eq!(download.description, "");
    assert_eq!(download.version, "1.2.0");
    assert_eq!(download.order, 20);

    let search = specs.iter().find(|s| s.id == "search").unwrap();
    assert_eq!(search.title, "search");
    assert_eq!(search.description, "Search the repository");
    assert_eq!(search.version, "1.0.0");
    assert_eq!(search.order, DEFAULT_ORDER);
}

#[test]
fn test_output_is_sorted() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "b.yaml", "info:\n  title: Bravo\n");
    write_file(dir.path(), "a.yaml", "info:\n  title: alpha\n");
    write_file(dir.path(), "2-z.yaml", "info:\n  title: Zulu\n");
    write_file(dir.path(), "2-y.yaml", "info:\n  title: Yankee\n");
    write_file(dir.path(), "100-x.yaml", "info:\n  title: Xray\n");

    let specs = indexer::index(dir.path());

    for pair in specs.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.order < b.order || (a.order == b.order && a.title <= b.title),
            "{a:?} sorted before {b:?}"
        );
    }
    // Code-point order puts "Bravo" before "alpha"
    assert_eq!(ids(&specs), vec!["2-y", "2-z", "100-x", "b", "a"]);
}

#[test]
fn test_duplicate_ids_are_kept() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "users.yaml", "info:\n  title: Users\n");
    write_file(dir.path(), "users.yml", "info:\n  title: Users\n  version: 2.0.0\n");

    let specs = indexer::index(dir.path());

    assert_eq!(ids(&specs), vec!["users", "users"]);
    // Ties keep file-name order
    assert_eq!(specs[0].version, "1.0.0");
    assert_eq!(specs[1].version, "2.0.0");
}

#[test]
fn test_subdirectories_are_not_scanned() {
    let dir = tempfile::tempdir().unwrap();
    write_file(&dir.path().join("nested"), "inner.yaml", fixtures::USERS);
    fs::create_dir(dir.path().join("folder.yaml")).unwrap();

    assert!(indexer::index(dir.path()).is_empty());
}

#[test]
fn test_written_index_format() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "10-users.yaml", fixtures::USERS);
    let output = dir.path().join("out").join("sidebar-data.json");

    indexer::run(dir.path(), &output).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        r#"[
  {
    "id": "10-users",
    "title": "User Endpoints",
    "description": "Login and profile management",
    "version": "2.0.0",
    "order": 10
  }
]"#
    );
}

#[test]
fn test_missing_directory_still_writes_empty_index() {
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("sidebar-data.json");

    let report = indexer::run(&out_dir.path().join("no-such-dir"), &output).unwrap();

    assert!(report.specs.is_empty());
    assert_eq!(fs::read_to_string(&output).unwrap(), "[]");
}

#[test]
fn test_rerun_is_byte_identical() {
    let dir = sample_specs_dir();
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("sidebar-data.json");

    indexer::run(dir.path(), &output).unwrap();
    let first = fs::read(&output).unwrap();
    indexer::run(dir.path(), &output).unwrap();
    let second = fs::read(&output).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_existing_index_is_overwritten() {
    let dir = sample_specs_dir();
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("sidebar-data.json");
    fs::write(&output, "stale content that is much longer than an index").unwrap();

    indexer::run(dir.path(), &output).unwrap();

    let parsed: Vec<SpecMetadata> =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(parsed.len(), 4);
}

#[test]
fn test_unwritable_output_is_fatal() {
    let dir = sample_specs_dir();
    let out_dir = tempfile::tempdir().unwrap();
    // The output path is a directory, so the write must fail
    let output = out_dir.path().join("sidebar-data.json");
    fs::create_dir(&output).unwrap();

    let err = indexer::run(dir.path(), &output).unwrap_err();
    assert!(matches!(err, IndexError::OutputWrite { .. }));
}
