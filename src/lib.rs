//! dupchkrs - fingerprint-based duplicate read checking for FASTQ files
//!
//! Each read is reduced to a fingerprint made of its first and last 21 bases
//! packed 3 bits per base into two `u64`s. Reads sharing a fingerprint are
//! counted as duplicates without ever comparing full sequences.
//!
//! # Example
//!
//! ```ignore
//! use dupchkrs::{InputSource, RunConfig, run};
//!
//! let mut config = RunConfig::new(InputSource::from_arg("reads.fq.gz"));
//! config.top_n = 10;
//! config.emit_fasta = true;
//!
//! run(&config, &mut std::io::stderr(), &mut std::io::stdout())?;
//! ```

pub mod algorithm;
pub mod args;
pub mod encoding;
pub mod error;
pub mod fingerprint;
pub mod histogram;
pub mod io;
pub mod report;
pub mod rescan;
pub mod topn;
pub mod utils;

// Re-export commonly used items
pub use algorithm::{DupSummary, DuplicateTracker, TopEntry, summarize};
pub use args::{Args, RunConfig};
pub use encoding::{BaseTable, WINDOW};
pub use error::DupError;
pub use fingerprint::{Fingerprint, FingerprintCodec, RenderMode};
pub use histogram::{DupRange, RangeHistogram, count_to_range};
pub use io::InputSource;
pub use rescan::{RescanStats, write_exemplars};
pub use topn::TopN;

use anyhow::{Context, Result};
use std::io::Write;
use std::time::Instant;
use tracing::info;
use utils::{Progress, format_duration_verbose};

/// What a finished run counted
#[derive(Debug)]
pub struct RunOutcome {
    pub records: u64,
    pub duplicates: u64,
    pub distinct: usize,
    pub summary: DupSummary,
    pub rescan: Option<RescanStats>,
}

/// Count duplicates in `config.input`, write the summary to `report`, and if
/// requested re-read the input writing one exemplar read per top duplicate
/// to `fasta`.
///
/// The summary is always complete before the second pass starts, so a
/// [`DupError::NotRewindable`] failure still leaves a full report behind.
pub fn run<R: Write, F: Write>(config: &RunConfig, report: &mut R, fasta: &mut F) -> Result<RunOutcome> {
    let start = Instant::now();
    let codec = FingerprintCodec::new(BaseTable::new(), config.skip);
    let mut tracker = DuplicateTracker::new(codec.clone());

    let mut input = config
        .input
        .open()
        .with_context(|| format!("failed to open {}", config.input.name()))?;
    let mut progress = Progress::new(config.progress_every, input.total_bytes);

    while let Some(seq) = input
        .reader
        .next_sequence()
        .with_context(|| format!("failed to read {}", config.input.name()))?
    {
        tracker.observe(seq)?;
        progress.poll(tracker.records(), input.bytes_read.get());
    }
    info!(
        "counted {} records ({} distinct fingerprints) in {}",
        tracker.records(),
        tracker.distinct(),
        format_duration_verbose(start.elapsed())
    );

    report::write_totals(report, tracker.records(), tracker.duplicates())?;
    let summary = summarize(tracker.counts(), config.top_n);
    report::write_summary(report, &summary, config.top_n, config.render_mode)?;
    report.flush()?;

    let rescan = if config.emit_fasta {
        let rescan_start = Instant::now();
        let mut reader = config.input.reopen()?;
        let stats = write_exemplars(&mut reader, &codec, &summary.top, fasta)?;
        fasta.flush()?;
        info!(
            "wrote {} of {} top reads after scanning {} records in {}",
            stats.found,
            summary.top.len(),
            stats.records_scanned,
            format_duration_verbose(rescan_start.elapsed())
        );
        Some(stats)
    } else {
        None
    };

    Ok(RunOutcome {
        records: tracker.records(),
        duplicates: tracker.duplicates(),
        distinct: tracker.distinct(),
        summary,
        rescan,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const X: &str = "ACGTACGTACGTACGTACGTACGTTTTTGGGGCCCCAAAATTTTG";
    const Y: &str = "TTTTTTTTTTGGGGGGGGGGCCCCCCCCCCAAAAAAAAAAN";
    const Z: &str = "GGGGGGGGGGGGGGGGGGGGGCCCCCCCCCCCCCCCCCCCCC";

    fn write_fastq(path: &Path, reads: &[&str]) {
        let mut out = String::new();
        for (i, seq) in reads.iter().enumerate() {
            out.push_str(&format!("@read{}\n{}\n+\n{}\n", i + 1, seq, "I".repeat(seq.len())));
        }
        std::fs::write(path, out).unwrap();
    }

    #[test]
    fn test_run_counts_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reads.fq");
        write_fastq(&path, &[X, Y, X, Z, X]);

        let config = RunConfig::new(InputSource::File(path));
        let mut report = Vec::new();
        let mut fasta = Vec::new();
        let outcome = run(&config, &mut report, &mut fasta).unwrap();

        assert_eq!(outcome.records, 5);
        assert_eq!(outcome.duplicates, 2);
        assert_eq!(outcome.distinct, 3);
        assert_eq!(outcome.summary.top.len(), 1);
        assert_eq!(outcome.summary.top[0].count, 2);
        assert!(outcome.rescan.is_none());
        assert!(fasta.is_empty());

        let text = String::from_utf8(report).unwrap();
        assert!(text.starts_with("5 records total. Dups: 2  40.00%\n"));
        assert!(text.contains("1 reads have 2 dups"));
        assert!(text.contains("Top 5 dups\n2 dups. Match bases: "));
    }

    #[test]
    fn test_run_writes_exemplars() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reads.fq");
        write_fastq(&path, &[Y, X, Z, X, Y, X]);

        let mut config = RunConfig::new(InputSource::File(path));
        config.emit_fasta = true;
        let mut report = Vec::new();
        let mut fasta = Vec::new();
        let outcome = run(&config, &mut report, &mut fasta).unwrap();

        let stats = outcome.rescan.unwrap();
        assert_eq!(stats.found, 2);
        assert_eq!(stats.records_scanned, 2);
        let text = String::from_utf8(fasta).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with(">1_dups "));
        assert_eq!(lines[1], Y);
        assert!(lines[2].starts_with(">2_dups "));
        assert_eq!(lines[3], X);
    }

    #[test]
    fn test_run_short_read_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reads.fq");
        write_fastq(&path, &[X, "ACGTACGT"]);

        let config = RunConfig::new(InputSource::File(path));
        let err = run(&config, &mut Vec::new(), &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DupError>(),
            Some(DupError::ReadTooShort { record: 2, len: 8, .. })
        ));
    }

    #[test]
    fn test_run_missing_file() {
        let config = RunConfig::new(InputSource::File("/nonexistent/reads.fq".into()));
        let err = run(&config, &mut Vec::new(), &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("failed to open"));
    }
}
