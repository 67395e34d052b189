//! Transfer log parsing
//!
//! Reconstructs structured transfer records from the backup agent's
//! `bzreports_lastfilestransmitted/*.log` files.
//!
//! # Structure
//!
//! - `scanner` - Leading integer + unit token extraction (`"3112 kBits/sec"`)
//! - `chunk` - `Chunk <hex> of <path>` decoding
//! - `tracker` - Batch header state for multi-line "combined" transfers
//! - `classify` - One raw line to one classified record
//! - `parser` - Stream driver, collects deliverable records and failures
//! - `stats` - Per-parse tallies
//! - `error` - Per-line and per-stream error types
//!
//! # Line shapes
//!
//! ```text
//! 2018-10-02 13:27:18 -  large  - throttle manual   11 -  3112 kBits/sec - 30460266 bytes - /Volumes/Space/a.mpg
//! 2018-10-10 01:40:42 -  small  - throttle x           -           dedup - 0 bytes - /Users/x/OutputsCache.json
//! 2018-10-01 15:25:14 -  large  - throttle manual   11 -  3822 kBits/sec - 10469477 bytes - Multiple small files batched in one request, the 3 files are listed below:
//! 2018-10-01 15:25:14 -                                                                   - /Volumes/Space/IMG_0927.JPG
//! 2018-10-11 10:49:34 -  large  - throttle auto     11 -  1643 kBits/sec -   410714 bytes - Chunk 00519 of /Users/x/Docker.qcow2
//! ```

pub mod chunk;
pub mod classify;
pub mod error;
pub mod parser;
pub mod scanner;
pub mod stats;
pub mod tracker;

pub use classify::{classify_line, Classified, Irregularity};
pub use error::{LineError, ParseError};
pub use parser::{
    parse_file, parse_reader, parse_str, IrregularLine, LineFailure, ParseReport, TransferParser,
};
pub use stats::ParseStats;
pub use tracker::CombinedGroupTracker;

use serde::Serialize;

/// Record kind, decided by the line classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransferKind {
    /// Single file sent in one request
    Normal,
    /// File already present remotely, nothing sent
    Dedup,
    /// One chunk of a large file, already present remotely
    DedupChunked,
    /// "Multiple small files batched in one request" header line
    CombinedHeader,
    /// Path-only line listed under a combined header
    CombinedContinued,
    /// One chunk of a large file
    Chunked,
    /// Blank line
    #[default]
    Empty,
}

impl TransferKind {
    /// All kinds, in display order.
    pub const ALL: [TransferKind; 7] = [
        TransferKind::Normal,
        TransferKind::Chunked,
        TransferKind::CombinedHeader,
        TransferKind::CombinedContinued,
        TransferKind::Dedup,
        TransferKind::DedupChunked,
        TransferKind::Empty,
    ];

    /// Whether records of this kind are part of the driver's output.
    pub fn is_deliverable(&self) -> bool {
        matches!(
            self,
            TransferKind::Normal | TransferKind::Chunked | TransferKind::CombinedContinued
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            TransferKind::Normal => "Normal",
            TransferKind::Dedup => "Dedup",
            TransferKind::DedupChunked => "DedupChunked",
            TransferKind::CombinedHeader => "CombinedHeader",
            TransferKind::CombinedContinued => "CombinedContinued",
            TransferKind::Chunked => "Chunked",
            TransferKind::Empty => "Empty",
        }
    }
}

impl std::fmt::Display for TransferKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One classified transfer event.
///
/// `chunk` depends on `kind`: the decoded chunk index for `Chunked` and
/// `DedupChunked`, the announced file count for `CombinedHeader`, and a
/// descending negative sequence (`-N..=-1`) for `CombinedContinued`.
///
/// Serializes to the `{stamp, size, chunk, fname}` shape consumed by the
/// flow visualisations; kind, speed and units stay internal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransferRecord {
    #[serde(skip)]
    pub kind: TransferKind,
    pub stamp: String,
    #[serde(skip)]
    pub speed: u64,
    #[serde(skip)]
    pub speed_unit: String,
    pub size: u64,
    #[serde(skip)]
    pub size_unit: String,
    pub chunk: i64,
    pub fname: String,
}

impl TransferRecord {
    /// Record for a blank line.
    pub fn empty() -> Self {
        Self::default()
    }

    /// `YYYY-MM-DD` part of the stamp.
    pub fn date(&self) -> &str {
        self.stamp.get(..10).unwrap_or(&self.stamp)
    }

    pub fn is_deliverable(&self) -> bool {
        self.kind.is_deliverable()
    }
}
