//! Per-parse tallies.

use std::collections::BTreeMap;

use humansize::{format_size, DECIMAL};

use super::TransferKind;

/// Counts gathered while parsing one stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Lines read, blank ones included
    pub lines: usize,
    /// Classified lines by kind
    pub kinds: BTreeMap<TransferKind, usize>,
    /// Lines that failed to classify
    pub failures: usize,
    /// Lines classified through a fallback path
    pub irregular: usize,
    /// Batch headers with fewer continuation lines than announced
    pub incomplete_batches: usize,
    /// Sum of `size` over delivered records (batch members are estimates)
    pub delivered_bytes: u64,
}

impl ParseStats {
    pub fn count(&self, kind: TransferKind) -> usize {
        self.kinds.get(&kind).copied().unwrap_or(0)
    }

    pub(crate) fn record(&mut self, kind: TransferKind) {
        *self.kinds.entry(kind).or_insert(0) += 1;
    }

    /// Records handed to the caller.
    pub fn delivered(&self) -> usize {
        TransferKind::ALL
            .iter()
            .filter(|k| k.is_deliverable())
            .map(|k| self.count(*k))
            .sum()
    }

    /// Lines consumed without producing output (blank, dedup, headers).
    pub fn skipped(&self) -> usize {
        TransferKind::ALL
            .iter()
            .filter(|k| !k.is_deliverable())
            .map(|k| self.count(*k))
            .sum()
    }

    /// Fold another stream's counts into this one.
    pub fn merge(&mut self, other: &ParseStats) {
        self.lines += other.lines;
        for (kind, count) in &other.kinds {
            *self.kinds.entry(*kind).or_insert(0) += count;
        }
        self.failures += other.failures;
        self.irregular += other.irregular;
        self.incomplete_batches += other.incomplete_batches;
        self.delivered_bytes += other.delivered_bytes;
    }

    pub fn delivered_human(&self) -> String {
        format_size(self.delivered_bytes, DECIMAL)
    }

    /// One-line summary, e.g. for per-file progress output.
    pub fn summary(&self) -> String {
        format!(
            "{} lines, {} records ({}), {} skipped, {} failed",
            self.lines,
            self.delivered(),
            self.delivered_human(),
            self.skipped(),
            self.failures
        )
    }

    /// Multi-line table of all counters.
    pub fn table(&self) -> String {
        let mut out = String::new();
        for kind in TransferKind::ALL {
            out.push_str(&format!("  {:<18} {:>8}\n", kind.name(), self.count(kind)));
        }
        out.push_str(&format!("  {:<18} {:>8}\n", "Failed", self.failures));
        out.push_str(&format!("  {:<18} {:>8}\n", "Irregular", self.irregular));
        out.push_str(&format!(
            "  {:<18} {:>8}\n",
            "IncompleteBatches", self.incomplete_batches
        ));
        out.push_str(&format!("  {:<18} {:>8}\n", "Lines", self.lines));
        out.push_str(&format!(
            "  {:<18} {:>8}\n",
            "Delivered",
            self.delivered_human()
        ));
        out
    }
}
