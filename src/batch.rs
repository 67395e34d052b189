//! Multi-file parsing: discovery, date filtering, parallel parse.
//!
//! Each file gets its own `TransferParser`, so files can be parsed on any
//! thread; lines within a file are always handled in order.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::transfer::{ParseError, ParseReport, TransferParser};

/// Result of parsing one log file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub result: Result<ParseReport, ParseError>,
}

/// List log files in `dir` with the given extension, sorted by name.
pub fn discover(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read log directory: {:?}", dir))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().is_some_and(|ext| ext == extension))
        .collect();

    files.sort();
    Ok(files)
}

/// Parse files in parallel. Results come back in input order.
pub fn parse_files(paths: &[PathBuf]) -> Vec<FileReport> {
    paths
        .par_iter()
        .map(|path| FileReport {
            path: path.clone(),
            result: TransferParser::new().parse_file(path),
        })
        .collect()
}

/// Half-open date range `[min, max)` over `YYYY-MM-DD` dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

impl DateRange {
    /// Accepts every date.
    pub fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    /// From `days` days before `today` up to `max`.
    pub fn days_ago_from(today: NaiveDate, days: u32, max: Option<NaiveDate>) -> Self {
        Self {
            min: today.checked_sub_days(chrono::Days::new(u64::from(days))),
            max,
        }
    }

    /// From `days` days before the local date up to `max`.
    pub fn days_ago(days: u32, max: Option<NaiveDate>) -> Self {
        Self::days_ago_from(Local::now().date_naive(), days, max)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min.map_or(true, |min| date >= min) && self.max.map_or(true, |max| date < max)
    }

    /// Whether a parsed file belongs in the output.
    ///
    /// Files are judged by their first delivered record; files without
    /// records are kept since they contribute nothing either way.
    pub fn keeps(&self, report: &ParseReport) -> bool {
        let Some(first) = report.first_date() else {
            return true;
        };
        match NaiveDate::parse_from_str(first, "%Y-%m-%d") {
            Ok(date) => self.contains(date),
            Err(_) => true,
        }
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Drop reports outside `range`, logging each decision.
pub fn retain_in_range(reports: &mut Vec<FileReport>, range: &DateRange) {
    reports.retain(|report| {
        let Ok(parsed) = &report.result else {
            return true;
        };
        let keep = range.keeps(parsed);
        info!(
            path = %report.path.display(),
            first = parsed.first_date().unwrap_or("-"),
            keep,
            "date range"
        );
        keep
    });
}
