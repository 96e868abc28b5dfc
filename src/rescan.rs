//! Second pass: find one literal read for each top fingerprint

use crate::algorithm::TopEntry;
use crate::error::Result;
use crate::fingerprint::{Fingerprint, FingerprintCodec};
use crate::io::{SequenceReader, write_exemplar};
use bstr::ByteSlice;
use std::collections::HashMap;
use std::io::{BufRead, Write};
use tracing::debug;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RescanStats {
    /// Records read before the scan stopped
    pub records_scanned: u64,
    pub found: usize,
    /// Top entries with no matching read (zero or unparsable labels included)
    pub missing: usize,
}

/// Re-read `reader` from its start and write an exemplar record for each of
/// `top`, stopping as soon as every fingerprint has been found.
///
/// Reads shorter than the codec's windows are skipped here; the counting
/// pass has already rejected such input.
pub fn write_exemplars<R: BufRead, W: Write>(
    reader: &mut SequenceReader<R>,
    codec: &FingerprintCodec,
    top: &[TopEntry],
    out: &mut W,
) -> Result<RescanStats> {
    let mut wanted: HashMap<Fingerprint, &TopEntry> = HashMap::with_capacity(top.len());
    for entry in top {
        let fp = codec.parse(&entry.label);
        if !fp.is_zero() {
            wanted.entry(fp).or_insert(entry);
        }
    }
    let targets = wanted.len();

    let mut stats = RescanStats::default();
    while !wanted.is_empty() {
        let Some(seq) = reader.next_sequence()? else {
            break;
        };
        stats.records_scanned += 1;
        let Some(fp) = codec.fingerprint(seq) else {
            continue;
        };
        if let Some(entry) = wanted.remove(&fp) {
            debug!(count = entry.count, read = %seq.as_bstr(), "found exemplar");
            write_exemplar(out, entry.count, &entry.label, seq)?;
        }
    }

    stats.found = targets - wanted.len();
    stats.missing = top.len() - stats.found;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{DuplicateTracker, summarize};
    use crate::encoding::BaseTable;
    use std::io::Cursor;

    const A: &str = "AAAAAAAAAAAAAAAAAAAAAGGGCCCCCCCCCCCCCCCCCCCCC";
    const A2: &str = "AAAAAAAAAAAAAAAAAAAAATTTCCCCCCCCCCCCCCCCCCCCC";
    const B: &str = "GGGGGGGGGGGGGGGGGGGGGAAATTTTTTTTTTTTTTTTTTTTT";
    const C: &str = "CCCCCCCCCCCCCCCCCCCCCAAAGGGGGGGGGGGGGGGGGGGGG";

    fn fastq(reads: &[&str]) -> Vec<u8> {
        let mut out = String::new();
        for (i, seq) in reads.iter().enumerate() {
            out.push_str(&format!("@r{}\n{}\n+\n{}\n", i, seq, "I".repeat(seq.len())));
        }
        out.into_bytes()
    }

    fn reader(data: Vec<u8>) -> SequenceReader<Cursor<Vec<u8>>> {
        SequenceReader::new(Cursor::new(data))
    }

    fn codec() -> FingerprintCodec {
        FingerprintCodec::new(BaseTable::new(), 0)
    }

    fn top_of(reads: &[&str], n: usize) -> Vec<TopEntry> {
        let mut tracker = DuplicateTracker::new(codec());
        for read in reads {
            tracker.observe(read.as_bytes()).unwrap();
        }
        summarize(tracker.counts(), n).top
    }

    #[test]
    fn test_first_matching_read_written() {
        let reads = [C, A, B, A2, B, A];
        let top = top_of(&reads, 5);
        assert_eq!(top.len(), 2);

        let mut out = Vec::new();
        let stats = write_exemplars(&mut reader(fastq(&reads)), &codec(), &top, &mut out).unwrap();
        assert_eq!(stats.found, 2);
        assert_eq!(stats.missing, 0);
        // B is found at record 3, after which nothing is left to find
        assert_eq!(stats.records_scanned, 3);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], format!(">2_dups {}", top[0].label));
        assert_eq!(lines[1], A);
        assert_eq!(lines[2], format!(">1_dups {}", top[1].label));
        assert_eq!(lines[3], B);
    }

    #[test]
    fn test_zero_label_skipped() {
        let top = vec![
            TopEntry {
                label: "garbage".to_string(),
                count: 3,
            },
            TopEntry {
                label: codec().fingerprint(B.as_bytes()).unwrap().to_string(),
                count: 1,
            },
        ];
        let mut out = Vec::new();
        let stats = write_exemplars(&mut reader(fastq(&[A, B])), &codec(), &top, &mut out).unwrap();
        assert_eq!(stats.found, 1);
        assert_eq!(stats.missing, 1);
        assert!(String::from_utf8(out).unwrap().starts_with(">1_dups "));
    }

    #[test]
    fn test_missing_fingerprint_scans_to_end() {
        let top = vec![TopEntry {
            label: codec().fingerprint(C.as_bytes()).unwrap().to_string(),
            count: 4,
        }];
        let mut out = Vec::new();
        let stats =
            write_exemplars(&mut reader(fastq(&[A, B, A])), &codec(), &top, &mut out).unwrap();
        assert_eq!(stats.records_scanned, 3);
        assert_eq!(stats.found, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_top_reads_nothing() {
        let mut out = Vec::new();
        let stats = write_exemplars(&mut reader(fastq(&[A, B])), &codec(), &[], &mut out).unwrap();
        assert_eq!(stats, RescanStats::default());
    }
}
