//! Configuration type definitions and defaults

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub parse: ParseConfig,
}

/// Where transmit logs are found
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_directory")]
    pub directory: String,
    #[serde(default = "default_extension")]
    pub extension: String,
}

pub fn default_directory() -> String {
    "/Library/Backblaze.bzpkg/bzdata/bzlogs/bzreports_lastfilestransmitted".to_string()
}

pub fn default_extension() -> String {
    "log".to_string()
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            extension: default_extension(),
        }
    }
}

/// Which files to keep, judged by the date of their first record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Keep files at most this many days old (unset keeps everything)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_ago: Option<u32>,
    /// Exclusive upper bound, `YYYY-MM-DD`
    #[serde(default = "default_max_date")]
    pub max_date: String,
}

pub fn default_max_date() -> String {
    "2040-12-31".to_string()
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            days_ago: None,
            max_date: default_max_date(),
        }
    }
}

impl FilterConfig {
    /// Parsed `max_date`; an empty string means no upper bound.
    pub fn max_date(&self) -> Result<Option<NaiveDate>> {
        if self.max_date.trim().is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(self.max_date.trim(), "%Y-%m-%d")
            .map(Some)
            .with_context(|| format!("Invalid filter.max_date: {:?}", self.max_date))
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Parse behaviour
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseConfig {
    /// Treat any unparsed line as a failed run
    #[serde(default)]
    pub strict: bool,
}
