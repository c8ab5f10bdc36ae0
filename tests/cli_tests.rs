//! CLI integration tests.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn hotel_visitors() -> Command {
    cargo_bin_cmd!("hotel-visitors")
}

const SMALL_DATASET: &str = r#"[
  {"hotel": "Resort Hotel", "arrival_date_year": "2015", "arrival_date_month": "July",
   "arrival_date_day_of_month": "1", "adults": "2", "children": "0", "babies": "0", "country": "PRT"},
  {"hotel": "City Hotel", "arrival_date_year": "2015", "arrival_date_month": "July",
   "arrival_date_day_of_month": "1", "adults": "1", "children": "1", "babies": "0", "country": "GBR"}
]"#;

fn small_dataset() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    std::fs::write(dir.path().join("bookings.json"), SMALL_DATASET).expect("write dataset");
    dir
}

#[test]
fn test_help() {
    hotel_visitors()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--start"))
        .stdout(predicate::str::contains("--end"));
}

#[test]
fn test_no_range_shows_coverage() {
    let dir = tempfile::tempdir().expect("create temp dir");
    hotel_visitors()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Data Available: July/2015 to August/2015 (61 days)",
        ))
        .stdout(predicate::str::contains("Select Dates to show Data"));
}

#[test]
fn test_filter_small_dataset() {
    let dir = small_dataset();
    hotel_visitors()
        .arg("--data")
        .arg(dir.path().join("bookings.json"))
        .args(["--start", "01/07/2015", "--end", "2015-07-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- 01/07/2015: 4"))
        .stdout(predicate::str::contains("- PRT: 2"))
        .stdout(predicate::str::contains("- GBR: 2"));
}

#[test]
fn test_equal_dates_prompt_for_valid_range() {
    let dir = small_dataset();
    hotel_visitors()
        .arg("--data")
        .arg(dir.path().join("bookings.json"))
        .args(["--start", "01/07/2015", "--end", "01/07/2015"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Select Valid Range of Dates"))
        .stdout(predicate::str::contains("Visitors per day").not());
}

#[test]
fn test_json_output() {
    let dir = small_dataset();
    let output = hotel_visitors()
        .arg("--data")
        .arg(dir.path().join("bookings.json"))
        .args(["--start", "2015-06-30", "--end", "2015-07-01", "--format", "json"])
        .output()
        .expect("run binary");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(json["status"], "ready");
    assert_eq!(json["visitors_per_day"]["01/07/2015"], 4);
    assert_eq!(json["adult_visitors_per_day"]["01/07/2015"], 3);
    assert_eq!(json["children_visitors_per_day"]["01/07/2015"], 1);
    assert_eq!(json["visitors_per_country"]["GBR"], 2);
}

#[test]
fn test_missing_data_file_fails() {
    let output = hotel_visitors()
        .args(["--data", "/nonexistent/bookings.json"])
        .output()
        .expect("run binary");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("dataset file not found").count(), 1);
}

#[test]
fn test_malformed_row_does_not_fail_load() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("bookings.json");
    let data = SMALL_DATASET.replacen(
        r#""arrival_date_month": "July""#,
        r#""arrival_date_month": null"#,
        1,
    );
    std::fs::write(&path, data).expect("write dataset");

    hotel_visitors()
        .arg("--data")
        .arg(&path)
        .args(["--start", "2015-06-30", "--end", "2015-07-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- 01/07/2015: 2"))
        .stdout(predicate::str::contains("- GBR: 2"));
}

#[test]
fn test_top_zero_rejected() {
    hotel_visitors()
        .args(["--top", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--top must be greater than 0"));
}

#[test]
fn test_init_writes_default_file_once() {
    let dir = tempfile::tempdir().expect("create temp dir");
    hotel_visitors()
        .current_dir(dir.path())
        .arg("--init")
        .assert()
        .success();
    assert!(dir.path().join("hotel_bookings.json").exists());

    hotel_visitors()
        .current_dir(dir.path())
        .arg("--init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_default_file_in_working_directory() {
    let dir = tempfile::tempdir().expect("create temp dir");
    std::fs::write(dir.path().join("hotel_bookings.json"), SMALL_DATASET).expect("write dataset");
    hotel_visitors()
        .current_dir(dir.path())
        .args(["--start", "2015-06-01", "--end", "2015-07-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Visitors per country (top 2 of 2)"));
}
