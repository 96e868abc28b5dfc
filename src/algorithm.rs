//! Fingerprint-based duplicate counting
//!
//! The first pass streams every read through [`DuplicateTracker`], building a
//! fingerprint -> occurrence count map. [`summarize`] then walks the finished
//! map once, feeding both the range histogram and the top-N selector.

use crate::error::{DupError, Result};
use crate::fingerprint::{Fingerprint, FingerprintCodec};
use crate::histogram::RangeHistogram;
use crate::topn::TopN;
use std::collections::HashMap;

/// One of the most duplicated fingerprints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopEntry {
    /// Plain rendering of the fingerprint
    pub label: String,
    /// Copies beyond the first
    pub count: u64,
}

/// Streaming duplicate counter
#[derive(Debug)]
pub struct DuplicateTracker {
    codec: FingerprintCodec,
    counts: HashMap<Fingerprint, u64>,
    records: u64,
    duplicates: u64,
}

impl DuplicateTracker {
    pub fn new(codec: FingerprintCodec) -> Self {
        Self {
            codec,
            counts: HashMap::new(),
            records: 0,
            duplicates: 0,
        }
    }

    /// Count one read's sequence line.
    ///
    /// Fails without touching any state if the read is too short for the
    /// head and tail windows.
    #[inline]
    pub fn observe(&mut self, seq: &[u8]) -> Result<Fingerprint> {
        let fp = self.codec.fingerprint(seq).ok_or_else(|| DupError::ReadTooShort {
            record: self.records + 1,
            len: seq.len(),
            required: self.codec.required_len(),
            sequence: seq.into(),
        })?;

        let count = self.counts.entry(fp).or_insert(0);
        if *count > 0 {
            self.duplicates += 1;
        }
        *count += 1;
        self.records += 1;
        Ok(fp)
    }

    pub fn records(&self) -> u64 {
        self.records
    }

    pub fn duplicates(&self) -> u64 {
        self.duplicates
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn count(&self, fp: &Fingerprint) -> u64 {
        self.counts.get(fp).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &HashMap<Fingerprint, u64> {
        &self.counts
    }

    pub fn codec(&self) -> &FingerprintCodec {
        &self.codec
    }
}

/// Result of the aggregation pass
#[derive(Debug)]
pub struct DupSummary {
    pub histogram: RangeHistogram,
    /// Highest count first, zero-count placeholders removed
    pub top: Vec<TopEntry>,
}

/// Bucket every duplicated fingerprint and pick the `top_n` most duplicated
pub fn summarize(counts: &HashMap<Fingerprint, u64>, top_n: usize) -> DupSummary {
    let mut histogram = RangeHistogram::new();
    let mut top: TopN<String, u64> = TopN::new(top_n);

    for (fp, &count) in counts {
        if count <= 1 {
            continue;
        }
        let extra = count - 1;
        histogram.add(*fp, extra);
        top.offer(extra, || fp.to_string());
    }

    let top = top
        .into_sorted_vec()
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(label, count)| TopEntry { label, count })
        .collect();

    DupSummary { histogram, top }
}
