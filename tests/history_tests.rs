mod common;

use cloud_weather_report::report::locate;
use common::*;

fn file_names(set: &cloud_weather_report::HistoricalSet) -> Vec<String> {
    set.iter()
        .map(|(_, path)| path.file_name().unwrap().to_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_locate_excludes_reference_and_other_bundles() {
    let dir = create_test_dir();
    let t1 = "git-2015-12-02T22-22-21-result.json";
    let t2 = "git-2015-12-03T08-00-00-result.json";
    let t3 = "foo-2015-12-04T08-00-00-result.json";
    let t4 = "git-2015-12-05T08-00-00-result.json";
    write_file(dir.path(), t1, &result_document("git", "2015-12-02T22:22:21", "PASS"));
    write_file(dir.path(), t2, &result_document("git", "2015-12-03T08:00:00", "FAIL"));
    write_file(dir.path(), t3, &result_document("foo", "2015-12-04T08:00:00", "PASS"));
    write_file(dir.path(), t4, &result_document("git", "2015-12-05T08:00:00", "PASS"));

    let set = locate("git", dir.path(), t4, 10);

    assert_eq!(file_names(&set), vec![t2, t1]);
    assert_eq!(set.documents[0].date, timestamp("2015-12-03T08:00:00"));
    assert_eq!(set.documents[1].date, timestamp("2015-12-02T22:22:21"));
}

#[test]
fn test_locate_reads_legacy_file_names() {
    let dir = create_test_dir();
    write_file(
        dir.path(),
        "git-2015-12-02T22:22:21-result.json",
        &result_document("git", "2015-12-02T22:22:21", "PASS"),
    );
    write_file(
        dir.path(),
        "git-2015-12-02T22-22-22-result.json",
        &result_document("git", "2015-12-02T22:22:22", "FAIL"),
    );
    write_file(
        dir.path(),
        "git-2015-12-02T22:22:21-result.html",
        "<html></html>",
    );

    let set = locate("git", dir.path(), "git-2015-12-02T22-22-23-result.json", 10);

    assert_eq!(
        file_names(&set),
        vec![
            "git-2015-12-02T22-22-22-result.json",
            "git-2015-12-02T22:22:21-result.json"
        ]
    );
}

#[test]
fn test_locate_skips_unreadable_documents() {
    let dir = create_test_dir();
    write_file(dir.path(), "git-2015-12-02T22-22-21-result.json", "not json");
    write_file(
        dir.path(),
        "git-2015-12-01T22-22-21-result.json",
        &result_document("git", "2015-12-01T22:22:21", "PASS"),
    );

    let set = locate("git", dir.path(), "git-2015-12-03T00-00-00-result.json", 10);

    assert_eq!(set.len(), 1);
    assert_eq!(file_names(&set), vec!["git-2015-12-01T22-22-21-result.json"]);
}

#[test]
fn test_locate_does_not_confuse_prefixed_bundles() {
    let dir = create_test_dir();
    write_file(
        dir.path(),
        "git-lab-2015-12-02T22-22-21-result.json",
        &result_document("git-lab", "2015-12-02T22:22:21", "PASS"),
    );

    assert!(locate("git", dir.path(), "git-2015-12-03T00-00-00-result.json", 10).is_empty());
    assert_eq!(
        locate("git-lab", dir.path(), "git-lab-2015-12-03T00-00-00-result.json", 10).len(),
        1
    );
}

#[test]
fn test_locate_ignores_subdirectories() {
    let dir = create_test_dir();
    let nested = dir.path().join("old");
    std::fs::create_dir(&nested).unwrap();
    write_file(
        &nested,
        "git-2015-12-02T22-22-21-result.json",
        &result_document("git", "2015-12-02T22:22:21", "PASS"),
    );

    assert!(locate("git", dir.path(), "git-2015-12-03T00-00-00-result.json", 10).is_empty());
}

#[test]
fn test_locate_zero_history() {
    let dir = create_test_dir();
    write_file(
        dir.path(),
        "git-2015-12-02T22-22-21-result.json",
        &result_document("git", "2015-12-02T22:22:21", "PASS"),
    );

    assert!(locate("git", dir.path(), "git-2015-12-03T00-00-00-result.json", 0).is_empty());
}
