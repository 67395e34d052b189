//! Stream driver.
//!
//! Classifies the lines of one log file in order and keeps the records that
//! describe data actually sent (`Normal`, `Chunked`, `CombinedContinued`).
//! Order matters: batch membership and continuation numbering only exist
//! through line order, so lines are never reordered or parsed in parallel.
//!
//! # Example
//!
//! ```
//! use bzlog::transfer::parse_str;
//!
//! let log = "2018-10-02 13:27:18 -  large  - throttle manual   11 -  3112 kBits/sec - 30460266 bytes - /Volumes/Space/a.mpg\n";
//! let report = parse_str(log);
//! assert_eq!(report.records.len(), 1);
//! assert_eq!(report.records[0].size, 30460266);
//! ```

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use super::classify::{classify_line, Irregularity};
use super::error::{LineError, ParseError};
use super::stats::ParseStats;
use super::tracker::CombinedGroupTracker;
use super::TransferRecord;

/// A line that could not be classified, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFailure {
    /// 1-based
    pub line_number: usize,
    pub line: String,
    pub error: LineError,
}

/// A line that classified through a fallback path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrregularLine {
    pub line_number: usize,
    pub line: String,
    pub irregularity: Irregularity,
}

/// Everything one stream produced.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    /// Delivered records, in input order
    pub records: Vec<TransferRecord>,
    pub failures: Vec<LineFailure>,
    pub irregular: Vec<IrregularLine>,
    pub stats: ParseStats,
}

impl ParseReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Date (`YYYY-MM-DD`) of the first delivered record.
    pub fn first_date(&self) -> Option<&str> {
        self.records.first().map(TransferRecord::date)
    }
}

/// Parser for one stream. Owns the batch tracker for the stream's lifetime.
#[derive(Debug, Default)]
pub struct TransferParser {
    tracker: CombinedGroupTracker,
    report: ParseReport,
}

impl TransferParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next line of the stream.
    pub fn push_line(&mut self, line: &str) {
        self.report.stats.lines += 1;
        let line_number = self.report.stats.lines;

        match classify_line(line, &mut self.tracker) {
            Ok(classified) => {
                let record = classified.record;
                self.report.stats.record(record.kind);

                if let Some(irregularity) = classified.irregularity {
                    self.report.stats.irregular += 1;
                    self.report.irregular.push(IrregularLine {
                        line_number,
                        line: line.to_string(),
                        irregularity,
                    });
                }

                if record.is_deliverable() {
                    self.report.stats.delivered_bytes += record.size;
                    self.report.records.push(record);
                }
            }
            Err(error) => self.push_failure(line_number, line.to_string(), error),
        }
    }

    fn push_failure(&mut self, line_number: usize, line: String, error: LineError) {
        debug!(line_number, %error, "unparsed line");
        self.report.stats.failures += 1;
        self.report.failures.push(LineFailure {
            line_number,
            line,
            error,
        });
    }

    /// Close the stream and hand back its report. The parser is reset.
    pub fn finish(&mut self) -> ParseReport {
        self.report.stats.incomplete_batches = self.tracker.incomplete_batches();
        self.tracker.reset();
        std::mem::take(&mut self.report)
    }

    /// Parse a complete stream of lines.
    pub fn parse_lines<I, S>(&mut self, lines: I) -> ParseReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tracker.reset();
        self.report = ParseReport::default();
        for line in lines {
            self.push_line(line.as_ref());
        }
        self.finish()
    }

    /// Parse a stream from any buffered reader.
    ///
    /// Lines that are not valid UTF-8 become per-line failures. A read error
    /// ends this stream with `ParseError::Io`.
    pub fn parse_reader<R: BufRead>(&mut self, mut reader: R) -> Result<ParseReport, ParseError> {
        self.tracker.reset();
        self.report = ParseReport::default();

        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| ParseError::Io {
                    line_number: self.report.stats.lines + 1,
                    source,
                })?;
            if read == 0 {
                break;
            }

            let bytes = trim_newline(&buf);
            match std::str::from_utf8(bytes) {
                Ok(line) => self.push_line(line),
                Err(_) => {
                    self.report.stats.lines += 1;
                    let line_number = self.report.stats.lines;
                    let line = String::from_utf8_lossy(bytes).into_owned();
                    self.push_failure(line_number, line, LineError::InvalidUtf8);
                }
            }
        }

        Ok(self.finish())
    }

    /// Open and parse one log file.
    pub fn parse_file<P: AsRef<Path>>(&mut self, path: P) -> Result<ParseReport, ParseError> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|source| ParseError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let report = self.parse_reader(BufReader::new(file))?;
        debug!(path = %path.display(), summary = %report.stats.summary(), "parsed");
        Ok(report)
    }
}

fn trim_newline(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}

/// Parse log text held in memory.
pub fn parse_str(content: &str) -> ParseReport {
    TransferParser::new().parse_lines(content.lines())
}

/// Parse a stream from a buffered reader with a fresh parser.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<ParseReport, ParseError> {
    TransferParser::new().parse_reader(reader)
}

/// Parse a log file with a fresh parser.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ParseReport, ParseError> {
    TransferParser::new().parse_file(path)
}
