//! Combined batch tracking.
//!
//! Small files are sent together and logged as one header line followed by
//! one path-only line per file:
//!
//! ```text
//! ... -  3822 kBits/sec - 10469477 bytes - Multiple small files batched in one request, the 3 files are listed below:
//! ...                                    - /Volumes/Space/IMG_0927.JPG
//! ...                                    - /Volumes/Space/IMG_4941.JPG
//! ...                                    - /Users/x/IMG_1490.JPG
//! ```
//!
//! The header's total size is spread evenly over its files (unit marked
//! with `*`) and continuation lines are numbered `-3, -2, -1`.

use tracing::warn;

use super::error::LineError;
use super::{TransferKind, TransferRecord};

/// Filename column text announcing a batch.
pub const BATCH_HEADER_PREFIX: &str = "Multiple small files batched in one request";

const COUNT_PREFIX: &str = "Multiple small files batched in one request, the ";
const COUNT_SUFFIX: &str = " files are listed below:";

/// Suffix appended to the size unit of estimated sizes.
pub const ESTIMATE_MARKER: char = '*';

/// Carries the most recent batch header across lines of one stream.
///
/// `last_header.chunk` is the countdown: it starts at the announced file
/// count and drops by one per continuation line.
#[derive(Debug, Default)]
pub struct CombinedGroupTracker {
    last_header: Option<TransferRecord>,
    incomplete: usize,
    /// The latest header line could not be read; its files have no batch.
    malformed_header: bool,
}

/// Parse the announced file count out of the header text.
pub fn parse_batch_count(text: &str) -> Result<i64, LineError> {
    let malformed = || LineError::MalformedBatchHeader {
        text: text.to_string(),
    };

    let count = text
        .strip_prefix(COUNT_PREFIX)
        .and_then(|rest| rest.strip_suffix(COUNT_SUFFIX))
        .ok_or_else(malformed)?
        .trim()
        .parse::<i64>()
        .map_err(|_| malformed())?;

    if count <= 0 {
        return Err(malformed());
    }
    Ok(count)
}

impl CombinedGroupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget any header, as at the start of a new stream.
    pub fn reset(&mut self) {
        self.last_header = None;
        self.incomplete = 0;
        self.malformed_header = false;
    }

    /// Continuation lines still expected for the current header.
    pub fn remaining(&self) -> i64 {
        self.last_header.as_ref().map_or(0, |h| h.chunk.max(0))
    }

    /// Headers replaced (or still open) before all their files were listed.
    pub fn incomplete_batches(&self) -> usize {
        self.incomplete + usize::from(self.remaining() > 0)
    }

    /// Build the header record and make it the current batch.
    ///
    /// `speed`/`size` come from the header line's middle columns; `size` is
    /// the batch total and gets divided by the announced file count.
    pub fn begin(
        &mut self,
        stamp: &str,
        (speed, speed_unit): (u64, String),
        (size, size_unit): (u64, String),
        text: &str,
    ) -> Result<TransferRecord, LineError> {
        self.close_open_batch();
        let count = match parse_batch_count(text) {
            Ok(count) => count,
            Err(e) => {
                self.malformed_header = true;
                return Err(e);
            }
        };
        self.malformed_header = false;

        let header = TransferRecord {
            kind: TransferKind::CombinedHeader,
            stamp: stamp.to_string(),
            speed,
            speed_unit,
            size: size / count as u64,
            size_unit: format!("{}{}", size_unit, ESTIMATE_MARKER),
            chunk: count,
            fname: text.to_string(),
        };
        self.last_header = Some(header.clone());
        Ok(header)
    }

    /// Drop the current batch, counting it if files were still expected.
    fn close_open_batch(&mut self) {
        if let Some(previous) = self.last_header.take() {
            if previous.chunk > 0 {
                warn!(
                    stamp = %previous.stamp,
                    missing = previous.chunk,
                    "batch header replaced before all files were listed"
                );
                self.incomplete += 1;
            }
        }
    }

    /// Build the record for one path-only line of the current batch.
    pub fn continue_with(&mut self, stamp: &str, path: &str) -> Result<TransferRecord, LineError> {
        if self.malformed_header {
            return Err(LineError::MalformedBatchMember);
        }
        let header = self
            .last_header
            .as_mut()
            .ok_or(LineError::OrphanContinuation)?;

        if header.chunk <= 0 {
            let announced = parse_batch_count(&header.fname).unwrap_or_default();
            return Err(LineError::BatchOverflow { announced });
        }

        let record = TransferRecord {
            kind: TransferKind::CombinedContinued,
            stamp: stamp.to_string(),
            speed: header.speed,
            speed_unit: header.speed_unit.clone(),
            size: header.size,
            size_unit: header.size_unit.clone(),
            chunk: -header.chunk,
            fname: path.to_string(),
        };
        header.chunk -= 1;
        Ok(record)
    }
}
