//! Stats command handler

use anyhow::Result;
use std::path::PathBuf;

use bzlog::batch::{self, FileReport};
use bzlog::{Config, ParseStats};

use super::resolve_files;

/// Print per-file and total tallies.
#[cfg(not(tarpaulin_include))]
pub fn handle(files: Vec<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let files = resolve_files(files, &config)?;
    let reports = batch::parse_files(&files);
    print!("{}", render(&reports));
    Ok(())
}

/// Render the stats report for a set of parsed files.
pub fn render(reports: &[FileReport]) -> String {
    let mut out = String::new();
    let mut total = ParseStats::default();
    let mut unreadable = 0;

    for report in reports {
        out.push_str(&format!("{}\n", report.path.display()));
        match &report.result {
            Ok(parsed) => {
                out.push_str(&parsed.stats.table());
                total.merge(&parsed.stats);
            }
            Err(e) => {
                out.push_str(&format!("  error: {}\n", e));
                unreadable += 1;
            }
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "Total ({} files, {} unreadable)\n",
        reports.len(),
        unreadable
    ));
    out.push_str(&total.table());
    out
}
