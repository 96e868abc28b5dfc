//! Duplicate-count ranges
//!
//! Fingerprints seen more than once are bucketed by how many extra copies
//! they have. Each bucket keeps a tally and the first fingerprint classified
//! into it as an example.

use crate::fingerprint::Fingerprint;
use std::collections::BTreeMap;
use std::fmt;

/// Fixed duplicate-count ranges, ordered from smallest to largest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DupRange {
    /// Counts 1 through 9 each get their own bucket
    Exact(u8),
    TenTo19,
    /// Inclusive at both ends, unlike its neighbours
    TwentyTo50,
    FiftyOneTo99,
    HundredTo199,
    TwoHundredTo499,
    FiveHundredTo999,
    ThousandPlus,
}

impl DupRange {
    pub fn as_str(&self) -> &'static str {
        const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        match self {
            DupRange::Exact(n) => DIGITS[usize::from(*n).min(9)],
            DupRange::TenTo19 => "10-19",
            DupRange::TwentyTo50 => "20-50",
            DupRange::FiftyOneTo99 => "51-99",
            DupRange::HundredTo199 => "100-199",
            DupRange::TwoHundredTo499 => "200-499",
            DupRange::FiveHundredTo999 => "500-999",
            DupRange::ThousandPlus => "1000+",
        }
    }
}

impl fmt::Display for DupRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an extra-copy count into its range
pub fn count_to_range(count: u64) -> DupRange {
    match count {
        0..=9 => DupRange::Exact(count as u8),
        10..=19 => DupRange::TenTo19,
        20..=50 => DupRange::TwentyTo50,
        51..=99 => DupRange::FiftyOneTo99,
        100..=199 => DupRange::HundredTo199,
        200..=499 => DupRange::TwoHundredTo499,
        500..=999 => DupRange::FiveHundredTo999,
        _ => DupRange::ThousandPlus,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeBucket {
    pub range: DupRange,
    pub tally: u64,
    pub example: Fingerprint,
}

#[derive(Debug, Default)]
pub struct RangeHistogram {
    buckets: BTreeMap<DupRange, RangeBucket>,
}

impl RangeHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one fingerprint with `extra` copies beyond the first
    pub fn add(&mut self, fingerprint: Fingerprint, extra: u64) {
        let range = count_to_range(extra);
        self.buckets
            .entry(range)
            .or_insert(RangeBucket {
                range,
                tally: 0,
                example: fingerprint,
            })
            .tally += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn get(&self, range: DupRange) -> Option<&RangeBucket> {
        self.buckets.get(&range)
    }

    /// Buckets by descending tally; equal tallies stay in range order
    pub fn sorted_by_tally(&self) -> Vec<&RangeBucket> {
        let mut buckets: Vec<_> = self.buckets.values().collect();
        buckets.sort_by(|a, b| b.tally.cmp(&a.tally));
        buckets
    }
}
