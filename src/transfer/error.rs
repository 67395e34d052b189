//! Transfer log parsing errors.
//!
//! - `LineError` - one line could not be classified; parsing continues
//! - `ParseError` - the stream itself failed (open/read); that stream stops

use std::path::PathBuf;

/// A single line that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    #[error("line is not valid UTF-8")]
    InvalidUtf8,

    #[error("invalid timestamp: {stamp:?}")]
    MalformedTimestamp { stamp: String },

    #[error("line ends before its filename column ({len} bytes)")]
    Truncated { len: usize },

    #[error("malformed chunk reference: {reason}")]
    MalformedChunk { reason: String },

    #[error("malformed batch header: {text:?}")]
    MalformedBatchHeader { text: String },

    #[error("batch continuation without a preceding batch header")]
    OrphanContinuation,

    #[error("batch continuation under a malformed batch header")]
    MalformedBatchMember,

    #[error("more batch continuations than the {announced} files announced")]
    BatchOverflow { announced: i64 },
}

/// Failure of a whole input stream.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read line {line_number}: {source}")]
    Io {
        line_number: usize,
        #[source]
        source: std::io::Error,
    },
}
