//! Tests for multi-file parsing over the fixture logs

use bzlog::batch::{self, DateRange};
use chrono::NaiveDate;
use tempfile::TempDir;

use super::helpers::setup_log_dir;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn discovered_logs_parse_in_name_order() {
    let temp = TempDir::new().unwrap();
    let dir = setup_log_dir(
        &temp,
        &["transmitted.log", "transmitted-sample.log", "malformed.log"],
    );

    let files = batch::discover(&dir, "log").unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec!["malformed.log", "transmitted-sample.log", "transmitted.log"]
    );

    let reports = batch::parse_files(&files);
    let delivered: Vec<usize> = reports
        .iter()
        .map(|r| r.result.as_ref().unwrap().records.len())
        .collect();
    assert_eq!(delivered, vec![2, 7, 7]);
}

#[test]
fn date_range_selects_files_by_first_record() {
    let temp = TempDir::new().unwrap();
    let dir = setup_log_dir(&temp, &["transmitted.log", "transmitted-sample.log"]);
    let files = batch::discover(&dir, "log").unwrap();
    let mut reports = batch::parse_files(&files);

    // transmitted-sample.log starts 2018-10-17, transmitted.log 2018-10-02
    let range = DateRange::days_ago_from(date("2018-10-20"), 5, Some(date("2040-12-31")));
    batch::retain_in_range(&mut reports, &range);

    assert_eq!(reports.len(), 1);
    assert!(reports[0].path.ends_with("transmitted-sample.log"));
}

#[test]
fn unreadable_file_does_not_stop_the_others() {
    let temp = TempDir::new().unwrap();
    let dir = setup_log_dir(&temp, &["transmitted.log"]);
    let files = vec![dir.join("missing.log"), dir.join("transmitted.log")];

    let mut reports = batch::parse_files(&files);
    assert!(reports[0].result.is_err());
    assert!(reports[1].result.is_ok());

    batch::retain_in_range(&mut reports, &DateRange::unbounded());
    assert_eq!(reports.len(), 2);
}
