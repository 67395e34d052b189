//! Parse command handler

use anyhow::{bail, Context, Result};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::info;

use bzlog::batch;
use bzlog::output::{write_records, OutputFormat};
use bzlog::{Config, TransferRecord};

use super::{report_problems, resolve_files};

/// Parse logs and write their delivered records.
#[cfg(not(tarpaulin_include))]
pub fn handle(
    files: Vec<PathBuf>,
    format: Option<OutputFormat>,
    output: Option<PathBuf>,
    days_ago: Option<u32>,
    strict: bool,
) -> Result<()> {
    let config = Config::load()?;
    let strict = strict || config.parse.strict;
    let format = format.unwrap_or(config.output.format);
    let range = config.date_range(days_ago)?;

    let files = resolve_files(files, &config)?;
    let mut reports = batch::parse_files(&files);
    batch::retain_in_range(&mut reports, &range);
    let problems = report_problems(&reports);

    let records: Vec<TransferRecord> = reports
        .into_iter()
        .filter_map(|report| report.result.ok())
        .flat_map(|parsed| parsed.records)
        .collect();

    info!(records = records.len(), "writing records");
    match &output {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {:?}", path))?;
            write_records(&records, file, format)?;
            eprintln!("Wrote {} records to {}", records.len(), path.display());
        }
        None => write_records(&records, io::stdout().lock(), format)?,
    }

    if strict && problems > 0 {
        bail!("{} line(s) or file(s) could not be parsed", problems);
    }
    Ok(())
}
