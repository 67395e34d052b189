//! CLI definitions for bzlog
//!
//! This module contains the clap CLI structure definitions, separated from main.rs
//! so they can be exercised from tests without spawning the binary.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Build clap styles.
///
/// - Green: headers, usage, command names (accent color)
/// - White: descriptions, placeholders (renders as light gray on dark terminals)
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default()) // Light gray for descriptions
        .valid(AnsiColor::White.on_default()) // Light gray for valid values
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "bzlog")]
#[command(about = "Reconstruct transfer records from backup transmit logs")]
#[command(
    long_about = "bzlog - Reconstruct what a backup agent actually sent.

Reads the agent's \"last files transmitted\" logs and rebuilds one record per
transferred file: timestamp, speed, size, chunk index and path. Batched small
files are split back out of their batch header (sizes marked as estimates),
chunks of large files are decoded, deduplicated files are left out.

QUICK START:
    bzlog parse 13.log              Parse one log to JSON on stdout
    bzlog parse --days-ago 20       Parse recent logs from the configured directory
    bzlog stats                     Tally record kinds per log file

Configuration lives in ~/.config/bzlog/config.toml."
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse transmit logs and write their records as JSON
    #[command(long_about = "Parse transmit logs and write the delivered records as JSON.

Files are parsed in parallel, one parser per file, and their records are
concatenated in file order. Without FILES, every log in the configured
directory is parsed. Files outside the date range are dropped first. In the
remaining files, lines that cannot be parsed are reported on stderr and
skipped; use --strict to turn them into a failing exit status.

EXAMPLES:
    bzlog parse 13.log 14.log               JSON array on stdout
    bzlog parse --format jsonl -o flow.jsonl
    bzlog parse --days-ago 20 --strict")]
    Parse {
        /// Log files (defaults to the configured log directory)
        #[arg(help = "Log files to parse")]
        files: Vec<PathBuf>,
        /// Output encoding (overrides config)
        #[arg(long, short, value_enum, help = "Output format (json or jsonl)")]
        format: Option<OutputFormat>,
        /// Write to a file instead of stdout
        #[arg(long, short, help = "Output file (default: stdout)")]
        output: Option<PathBuf>,
        /// Only keep files whose first record is at most N days old
        #[arg(long, help = "Keep only files from the last N days")]
        days_ago: Option<u32>,
        /// Fail if any line or file could not be parsed
        #[arg(long, help = "Exit with an error on any unparsed line")]
        strict: bool,
    },

    /// Show per-file record statistics
    #[command(long_about = "Parse transmit logs and print tallies per file and in total.

Counts every record kind (including the skipped dedup, header and blank
lines), unparsed and irregular lines, batches with missing members and the
number of bytes delivered.

EXAMPLE:
    bzlog stats 13.log")]
    Stats {
        /// Log files (defaults to the configured log directory)
        #[arg(help = "Log files to inspect")]
        files: Vec<PathBuf>,
    },

    /// Configuration management
    #[command(
        subcommand,
        long_about = "View the bzlog configuration.

Configuration is stored in ~/.config/bzlog/config.toml.

EXAMPLES:
    bzlog config show        Display current configuration
    bzlog config path        Print the config file location
    bzlog config init        Write a config file with the defaults"
    )]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
    /// Write the default configuration file
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}
