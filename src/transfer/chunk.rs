//! `Chunk <hex> of <path>` decoding.
//!
//! Large files are sent in pieces; the filename column then reads
//! `Chunk 0052a of /Users/x/Docker.qcow2` where the index is hexadecimal.

use super::error::LineError;

/// Prefix marking a chunked filename column.
pub const CHUNK_PREFIX: &str = "Chunk ";

const OF_SEPARATOR: &str = " of ";

/// A decoded chunk reference, borrowing the path from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRef<'a> {
    pub index: i64,
    pub path: &'a str,
}

/// Decode a filename column.
///
/// Returns `Ok(None)` when the column is not a chunk reference at all, and
/// an error when it starts like one but does not parse.
pub fn decode_chunk(field: &str) -> Result<Option<ChunkRef<'_>>, LineError> {
    let Some(rest) = field.strip_prefix(CHUNK_PREFIX) else {
        return Ok(None);
    };

    let Some((hex, path)) = rest.split_once(OF_SEPARATOR) else {
        return Err(LineError::MalformedChunk {
            reason: format!("missing {:?} in {:?}", OF_SEPARATOR, field),
        });
    };

    let index = i64::from_str_radix(hex, 16).map_err(|e| LineError::MalformedChunk {
        reason: format!("bad index {:?}: {}", hex, e),
    })?;

    if path.is_empty() {
        return Err(LineError::MalformedChunk {
            reason: format!("no path in {:?}", field),
        });
    }

    Ok(Some(ChunkRef { index, path }))
}
