//! bzlog Library
//!
//! Reconstructs structured transfer records from the backup agent's
//! "last files transmitted" logs.

pub mod batch;
pub mod cli;
pub mod config;
pub mod output;
pub mod transfer;

pub use batch::{DateRange, FileReport};
pub use config::Config;
pub use output::OutputFormat;
pub use transfer::{
    parse_file, parse_reader, parse_str, LineError, ParseError, ParseReport, ParseStats,
    TransferKind, TransferParser, TransferRecord,
};
