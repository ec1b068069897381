use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn write_fixture(td: &assert_fs::TempDir) {
    let idx = td.child("lucene/content");
    idx.create_dir_all().unwrap();
    idx.child("index.json")
        .write_str(
            r#"{
    "type": "lucene",
    "files": [
        {"name": "_0.cfs", "size": 1258291, "modified": 1476792800724},
        {"name": "segments.gen", "size": 20, "modified": 1476792800724},
        {"name": "segments_1", "size": 312, "modified": 1476792800724}
    ]
}"#,
        )
        .unwrap();
    idx.child("segments_1.an.json")
        .write_str(
            r#"{
    "current": {
        "segment_sequence": 1,
        "segment_name": "_0",
        "commits": [
            {"files": ["_0.cfs"], "name": "_0", "doccount": 42, "delcount": 0,
             "sizeInBytes": 1258291}
        ]
    }
}"#,
        )
        .unwrap();
    idx.child("segments_1.da.json").write_str(r#"{"status": "accepted"}"#).unwrap();
}

#[test]
fn list_shows_indexes_and_generations() {
    let td = assert_fs::TempDir::new().unwrap();
    write_fixture(&td);

    Command::cargo_bin("segscope")
        .unwrap()
        .args(["list", td.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("index lucene/content: 3 files, 2 generations"))
        .stdout(predicate::str::contains("segments.gen"));
}

#[test]
fn list_long_formats_size_date_and_age() {
    let td = assert_fs::TempDir::new().unwrap();
    write_fixture(&td);

    Command::cargo_bin("segscope")
        .unwrap()
        .args(["list", td.path().to_str().unwrap(), "--long"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.2 MB"))
        .stdout(predicate::str::contains("2016-10-18T12:13:20.724+00:00"));
}

#[test]
fn list_exclude_hides_matching_files() {
    let td = assert_fs::TempDir::new().unwrap();
    write_fixture(&td);

    Command::cargo_bin("segscope")
        .unwrap()
        .args(["list", td.path().to_str().unwrap(), "--exclude", "_0*"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_0.cfs").not())
        .stdout(predicate::str::contains("segments_1"));
}

#[test]
fn list_empty_root_reports_no_indexes() {
    let td = assert_fs::TempDir::new().unwrap();

    Command::cargo_bin("segscope")
        .unwrap()
        .args(["list", td.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("no indexes found under"));
}

#[test]
fn analyze_prints_commits_and_associations() {
    let td = assert_fs::TempDir::new().unwrap();
    write_fixture(&td);

    Command::cargo_bin("segscope")
        .unwrap()
        .args(["analyze", td.path().to_str().unwrap(), "lucene/content", "segments_1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("analysis of segments_1 in lucene/content"))
        .stdout(predicate::str::contains("commit _0: 42 docs, 0 deleted, 1.2 MB"))
        .stdout(predicate::str::contains("_0.cfs <- _0"))
        .stdout(predicate::str::contains("1 files carry segment references"));
}

#[test]
fn analyze_with_inconsistent_report_fails() {
    let td = assert_fs::TempDir::new().unwrap();
    write_fixture(&td);
    td.child("lucene/content/segments.gen.an.json")
        .write_str(
            r#"{"current": {"segment_sequence": 0, "segment_name": "_9",
                 "commits": [{"files": ["ghost"]}]}}"#,
        )
        .unwrap();

    Command::cargo_bin("segscope")
        .unwrap()
        .args(["analyze", td.path().to_str().unwrap(), "lucene/content", "segments.gen"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("references unknown file"));
}

#[test]
fn revert_without_canned_response_is_unsupported() {
    let td = assert_fs::TempDir::new().unwrap();
    write_fixture(&td);

    Command::cargo_bin("segscope")
        .unwrap()
        .args(["revert", td.path().to_str().unwrap(), "lucene/content", "segments_1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("revert is not supported by this backend"));
}

#[test]
fn damage_with_canned_response_prints_the_receipt() {
    let td = assert_fs::TempDir::new().unwrap();
    write_fixture(&td);

    Command::cargo_bin("segscope")
        .unwrap()
        .args(["damage", td.path().to_str().unwrap(), "lucene/content", "segments_1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("damage of segments_1 acknowledged"))
        .stdout(predicate::str::contains("\"status\": \"accepted\""));
}
