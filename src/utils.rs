//! Utility functions
//!
//! Number formatting and progress reporting helpers.

use std::time::{Duration, Instant};
use tracing::info;

/// Minimum time between two progress messages
pub const PROGRESS_MIN_INTERVAL: Duration = Duration::from_millis(250);

/// Format a duration into (minutes, seconds) tuple
///
/// Useful for printing elapsed time in human-readable format.
#[inline]
pub fn format_duration(dur: Duration) -> (u64, u64) {
    let secs = dur.as_secs();
    (secs / 60, secs % 60)
}

/// Format duration as a human-readable string
#[inline]
pub fn format_duration_verbose(dur: Duration) -> String {
    let secs = dur.as_secs();
    if secs >= 60 {
        format!("{} min {} sec", secs / 60, secs % 60)
    } else {
        format!("{:.1} sec", dur.as_secs_f64())
    }
}

/// Format an integer with comma thousands separators
pub fn with_commas(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `part / whole` as a percentage string, `0.00%` when `whole` is zero
pub fn pct_str(part: u64, whole: u64, decimals: usize) -> String {
    let pct = if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    };
    format!("{:.*}%", decimals, pct)
}

/// Rate-limited progress messages for the counting pass
#[derive(Debug)]
pub struct Progress {
    every: u64,
    last: Instant,
    total_bytes: Option<u64>,
}

impl Progress {
    /// Poll every `every` records (0 disables progress), with the input size if known
    pub fn new(every: u64, total_bytes: Option<u64>) -> Self {
        Self {
            every,
            last: Instant::now(),
            total_bytes,
        }
    }

    /// Called after each record; logs at most every `every` records and
    /// never more often than [`PROGRESS_MIN_INTERVAL`]. Returns whether a
    /// message was emitted.
    #[inline]
    pub fn poll(&mut self, records: u64, bytes_read: u64) -> bool {
        if self.every == 0 || records % self.every != 0 {
            return false;
        }
        if self.last.elapsed() < PROGRESS_MIN_INTERVAL {
            return false;
        }
        match self.total_bytes {
            Some(total) if total > 0 => {
                info!("{} records {}", with_commas(records), pct_str(bytes_read, total, 2))
            }
            _ => info!("{} records", with_commas(records)),
        }
        self.last = Instant::now();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_seconds() {
        let dur = Duration::from_secs(45);
        assert_eq!(format_duration(dur), (0, 45));
    }

    #[test]
    fn test_format_duration_minutes() {
        let dur = Duration::from_secs(125); // 2 min 5 sec
        assert_eq!(format_duration(dur), (2, 5));
    }

    #[test]
    fn test_format_duration_verbose_minutes() {
        let dur = Duration::from_secs(125);
        assert_eq!(format_duration_verbose(dur), "2 min 5 sec");
    }

    #[test]
    fn test_with_commas() {
        assert_eq!(with_commas(0), "0");
        assert_eq!(with_commas(999), "999");
        assert_eq!(with_commas(1000), "1,000");
        assert_eq!(with_commas(1234567), "1,234,567");
        assert_eq!(with_commas(100000), "100,000");
    }

    #[test]
    fn test_pct_str() {
        assert_eq!(pct_str(1, 4, 2), "25.00%");
        assert_eq!(pct_str(2, 3, 2), "66.67%");
        assert_eq!(pct_str(5, 0, 2), "0.00%");
    }

    #[test]
    fn test_progress_rate_limited() {
        let mut progress = Progress::new(10, Some(1000));
        assert!(!progress.poll(5, 0));
        // too soon after construction
        assert!(!progress.poll(10, 0));
        progress.last = Instant::now() - PROGRESS_MIN_INTERVAL * 2;
        assert!(progress.poll(20, 500));
        assert!(!progress.poll(30, 600));
    }

    #[test]
    fn test_progress_disabled() {
        let mut progress = Progress::new(0, None);
        progress.last = Instant::now() - PROGRESS_MIN_INTERVAL * 2;
        assert!(!progress.poll(100_000, 0));
    }
}
