//! Command handlers for the bzlog CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod config;
pub mod parse;
pub mod stats;

use anyhow::{bail, Result};
use std::path::PathBuf;
use tracing::{info, warn};

use bzlog::batch::{self, FileReport};
use bzlog::Config;

/// Use the given files, or discover logs in the configured directory.
pub fn resolve_files(files: Vec<PathBuf>, config: &Config) -> Result<Vec<PathBuf>> {
    if !files.is_empty() {
        return Ok(files);
    }

    let dir = config.logs_directory();
    let found = batch::discover(&dir, &config.logs.extension)?;
    if found.is_empty() {
        bail!(
            "No *.{} files found in {}",
            config.logs.extension,
            dir.display()
        );
    }
    info!(dir = %dir.display(), count = found.len(), "discovered log files");
    Ok(found)
}

/// Log the per-line problems of every parsed file.
///
/// Returns the number of failed lines plus unreadable files.
pub fn report_problems(reports: &[FileReport]) -> usize {
    let mut problems = 0;
    for report in reports {
        let path = report.path.display();
        match &report.result {
            Ok(parsed) => {
                for failure in &parsed.failures {
                    warn!(
                        "{}:{}: {}: {}",
                        path, failure.line_number, failure.error, failure.line
                    );
                }
                for irregular in &parsed.irregular {
                    warn!(
                        "{}:{}: {}: {}",
                        path, irregular.line_number, irregular.irregularity, irregular.line
                    );
                }
                if parsed.stats.incomplete_batches > 0 {
                    warn!(
                        "{}: {} batch(es) listed fewer files than announced",
                        path, parsed.stats.incomplete_batches
                    );
                }
                info!("{}: {}", path, parsed.stats.summary());
                problems += parsed.failures.len();
            }
            Err(e) => {
                warn!("{}: {}", path, e);
                problems += 1;
            }
        }
    }
    problems
}
