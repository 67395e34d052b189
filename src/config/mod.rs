//! Configuration management for bzlog

mod io;
mod types;

pub use types::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::batch::DateRange;

impl Config {
    /// Get the config file path (~/.config/bzlog/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        io::load_from(&io::config_path()?)
    }

    /// Load configuration from a specific file, or defaults if it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        io::save_to(self, &io::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        io::save_to(self, path)
    }

    /// Expand ~ in the log directory path
    pub fn logs_directory(&self) -> PathBuf {
        let dir = &self.logs.directory;
        if let Some(stripped) = dir.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        }
        PathBuf::from(dir)
    }

    /// Date range from the filter section, with `days_ago` overridable
    pub fn date_range(&self, days_ago: Option<u32>) -> Result<DateRange> {
        let max = self.filter.max_date()?;
        Ok(match days_ago.or(self.filter.days_ago) {
            Some(days) => DateRange::days_ago(days, max),
            None => DateRange { min: None, max },
        })
    }
}
