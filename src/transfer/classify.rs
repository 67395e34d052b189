//! Line classification.
//!
//! Only two things in a line sit at fixed byte offsets: the timestamp
//! (`[0,19)`) and, on dedup lines, the `dedup` marker (`[65,70)`) with the
//! path starting at byte 83. Everything else is found by delimiters, since
//! speed and size columns change width (`1 bytes` vs `30460266 bytes`).
//!
//! The path column is located by searching for a delimiter immediately
//! followed by something that can only start a value (`/`, `Chunk`,
//! `Multiple`). Paths may contain `" - "` themselves, so splitting on the
//! n-th delimiter is not enough.

use chrono::NaiveDateTime;

use super::chunk::decode_chunk;
use super::error::LineError;
use super::scanner::scan_quantity;
use super::tracker::{CombinedGroupTracker, BATCH_HEADER_PREFIX};
use super::{TransferKind, TransferRecord};

/// Column delimiter.
pub const DELIMITER: &str = " - ";

const STAMP_LEN: usize = 19;
const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DEDUP_MARKER: &str = "dedup";
const DEDUP_MARKER_AT: usize = 65;
const DEDUP_FNAME_AT: usize = 83;

/// Delimiter + start-of-value tokens that open the path column.
const ANCHORS: [&str; 3] = [" - /", " - Chunk", " - Multiple"];

/// Size class, throttle, speed, size.
const MIDDLE_COLUMNS: usize = 4;

/// A line that classified, but not the way well-formed lines do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Irregularity {
    /// No anchor found; columns were recovered by a plain delimiter split.
    Unanchored,
    /// The middle region had fewer columns than expected; speed and size
    /// were left at zero.
    MissingColumns { found: usize },
}

impl std::fmt::Display for Irregularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Irregularity::Unanchored => write!(f, "unexpected structure: no path anchor"),
            Irregularity::MissingColumns { found } => write!(
                f,
                "unexpected structure: {} of {} middle columns",
                found, MIDDLE_COLUMNS
            ),
        }
    }
}

/// Outcome of classifying one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub record: TransferRecord,
    pub irregularity: Option<Irregularity>,
}

impl Classified {
    fn regular(record: TransferRecord) -> Self {
        Self {
            record,
            irregularity: None,
        }
    }

    fn flagged(record: TransferRecord, irregularity: Irregularity) -> Self {
        Self {
            record,
            irregularity: Some(irregularity),
        }
    }
}

/// Classify one raw line (without its newline).
///
/// Batch headers and continuation lines read and update `tracker`; every
/// other kind leaves it alone.
pub fn classify_line(
    line: &str,
    tracker: &mut CombinedGroupTracker,
) -> Result<Classified, LineError> {
    if line.trim().is_empty() {
        return Ok(Classified::regular(TransferRecord::empty()));
    }

    let stamp = read_stamp(line)?;

    if line.get(DEDUP_MARKER_AT..DEDUP_MARKER_AT + DEDUP_MARKER.len()) == Some(DEDUP_MARKER) {
        return classify_dedup(line, stamp).map(Classified::regular);
    }

    // stamp is 19 ASCII bytes, so slicing here is on a char boundary
    let Some(anchor) = find_anchor(&line[STAMP_LEN..]).map(|at| at + STAMP_LEN) else {
        return classify_unanchored(line, stamp, tracker);
    };

    let middle = &line[STAMP_LEN..anchor];
    let middle = middle.strip_prefix(DELIMITER).unwrap_or(middle);
    let fname = &line[anchor + DELIMITER.len()..];

    if middle.trim().is_empty() {
        return tracker
            .continue_with(stamp, fname)
            .map(Classified::regular);
    }

    let columns: Vec<&str> = middle.splitn(MIDDLE_COLUMNS, DELIMITER).collect();
    if columns.len() < MIDDLE_COLUMNS {
        let irregularity = Irregularity::MissingColumns {
            found: columns.len(),
        };
        let record = classify_sent(stamp, no_value(), no_value(), fname, tracker)?;
        return Ok(Classified::flagged(record, irregularity));
    }

    let speed = scan_quantity(columns[2].trim());
    let size = scan_quantity(columns[3].trim());
    classify_sent(stamp, speed, size, fname, tracker).map(Classified::regular)
}

fn read_stamp(line: &str) -> Result<&str, LineError> {
    let malformed = || LineError::MalformedTimestamp {
        stamp: line.chars().take(STAMP_LEN).collect(),
    };

    let stamp = line.get(..STAMP_LEN).ok_or_else(malformed)?;
    NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT).map_err(|_| malformed())?;
    Ok(stamp)
}

fn find_anchor(text: &str) -> Option<usize> {
    ANCHORS.iter().filter_map(|anchor| text.find(anchor)).min()
}

fn no_value() -> (u64, String) {
    (0, String::new())
}

fn classify_dedup(line: &str, stamp: &str) -> Result<TransferRecord, LineError> {
    let fname = line
        .get(DEDUP_FNAME_AT..)
        .filter(|f| !f.is_empty())
        .ok_or(LineError::Truncated { len: line.len() })?;

    let mut record = TransferRecord {
        kind: TransferKind::Dedup,
        stamp: stamp.to_string(),
        size_unit: "bytes".to_string(),
        fname: fname.to_string(),
        ..Default::default()
    };

    if let Some(chunk) = decode_chunk(fname)? {
        record.kind = TransferKind::DedupChunked;
        record.chunk = chunk.index;
        record.fname = chunk.path.to_string();
    }
    Ok(record)
}

/// Header, chunk or plain transfer, once speed and size are known.
fn classify_sent(
    stamp: &str,
    speed: (u64, String),
    size: (u64, String),
    fname: &str,
    tracker: &mut CombinedGroupTracker,
) -> Result<TransferRecord, LineError> {
    if fname.starts_with(BATCH_HEADER_PREFIX) {
        return tracker.begin(stamp, speed, size, fname);
    }

    let (speed, speed_unit) = speed;
    let (size, size_unit) = size;
    let mut record = TransferRecord {
        kind: TransferKind::Normal,
        stamp: stamp.to_string(),
        speed,
        speed_unit,
        size,
        size_unit,
        chunk: 0,
        fname: fname.to_string(),
    };

    if let Some(chunk) = decode_chunk(fname)? {
        record.kind = TransferKind::Chunked;
        record.chunk = chunk.index;
        record.fname = chunk.path.to_string();
    }
    Ok(record)
}

/// Plain delimiter split for lines whose path column has no anchor, e.g.
/// relative or drive-letter paths.
fn classify_unanchored(
    line: &str,
    stamp: &str,
    tracker: &mut CombinedGroupTracker,
) -> Result<Classified, LineError> {
    let fields: Vec<&str> = line.splitn(6, DELIMITER).collect();
    let truncated = || LineError::Truncated { len: line.len() };
    if fields.len() < 3 {
        return Err(truncated());
    }

    // stamp, blank padding, path
    if fields[1].trim().is_empty() {
        let path = line.splitn(3, DELIMITER).nth(2).unwrap_or_default();
        if path.trim().is_empty() {
            return Err(truncated());
        }
        let record = tracker.continue_with(stamp, path)?;
        return Ok(Classified::flagged(record, Irregularity::Unanchored));
    }

    let (speed, size) = if fields.len() == 6 {
        (
            scan_quantity(fields[3].trim()),
            scan_quantity(fields[4].trim()),
        )
    } else {
        (no_value(), no_value())
    };
    let fname = fields.last().copied().unwrap_or_default();
    if fname.trim().is_empty() {
        return Err(truncated());
    }

    let record = classify_sent(stamp, speed, size, fname, tracker)?;
    Ok(Classified::flagged(record, Irregularity::Unanchored))
}
