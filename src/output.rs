//! JSON / JSON Lines output for parsed records.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::{BufWriter, Write};

use crate::transfer::TransferRecord;

/// Output encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON array
    #[default]
    Json,
    /// One JSON object per line
    Jsonl,
}

/// Write records to `writer` in the given format.
pub fn write_records<W: Write>(
    records: &[TransferRecord],
    writer: W,
    format: OutputFormat,
) -> Result<()> {
    let mut out = BufWriter::new(writer);

    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut out, records).context("Failed to encode records")?;
            writeln!(out)?;
        }
        OutputFormat::Jsonl => {
            for record in records {
                serde_json::to_writer(&mut out, record).context("Failed to encode record")?;
                writeln!(out)?;
            }
        }
    }

    out.flush().context("Failed to flush output")?;
    Ok(())
}
