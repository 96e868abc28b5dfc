//! Read fingerprints
//!
//! A fingerprint is the packed head window and packed tail window of a read.
//! Two reads with the same windows share a fingerprint; the reverse does not
//! hold since every non-ACGTN byte packs to the same code.

use crate::encoding::{BaseTable, WINDOW, unpack};
use std::fmt;

/// Packed first and last [`WINDOW`] bases of a read
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint {
    pub head: u64,
    pub tail: u64,
}

impl Fingerprint {
    #[inline]
    pub fn new(head: u64, tail: u64) -> Self {
        Self { head, tail }
    }

    /// The zero fingerprint stands for "no fingerprint", never a real read
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.head == 0 && self.tail == 0
    }

    pub fn bases(&self) -> (String, String) {
        (unpack(self.head), unpack(self.tail))
    }

    pub fn render(&self, mode: RenderMode) -> String {
        let (head, tail) = self.bases();
        mode.format(&head, &tail)
    }
}

/// Plain rendering, the form `FingerprintCodec::parse` reads back
impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (head, tail) = self.bases();
        write!(f, "{} {}", head, tail)
    }
}

/// How fingerprints are displayed, fixed for the whole run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// `<head> <tail>`
    #[default]
    Plain,
    /// `^<head>.*<tail>$`, ready for grep against raw reads
    Pattern,
}

impl RenderMode {
    pub fn format(self, head: &str, tail: &str) -> String {
        match self {
            RenderMode::Plain => format!("{} {}", head, tail),
            RenderMode::Pattern => format!("^{}.*{}$", head, tail),
        }
    }

    /// Re-render a plain label in this mode without going through the encoder
    pub fn format_label(self, label: &str) -> String {
        match label.split_once(' ') {
            Some((head, tail)) => self.format(head, tail),
            None => label.to_string(),
        }
    }
}

/// Computes fingerprints of raw reads
#[derive(Debug, Clone, Default)]
pub struct FingerprintCodec {
    table: BaseTable,
    skip: usize,
}

impl FingerprintCodec {
    pub fn new(table: BaseTable, skip: usize) -> Self {
        Self { table, skip }
    }

    pub fn skip(&self) -> usize {
        self.skip
    }

    /// Minimum read length this codec accepts
    #[inline]
    pub fn required_len(&self) -> usize {
        self.skip + WINDOW
    }

    /// Fingerprint of one read, or `None` if the read is shorter than
    /// [`required_len`](Self::required_len).
    ///
    /// The head window starts after `skip` bases; the tail window is always
    /// the last [`WINDOW`] bases.
    #[inline]
    pub fn fingerprint(&self, seq: &[u8]) -> Option<Fingerprint> {
        if seq.len() < self.required_len() {
            return None;
        }
        let head = self.table.pack(&seq[self.skip..]);
        let tail = self.table.pack(&seq[seq.len() - WINDOW..]);
        Some(Fingerprint { head, tail })
    }

    /// Parse a plain label (`<head> <tail>`) back into a fingerprint.
    ///
    /// Anything that does not split into exactly two tokens on a single
    /// space yields the zero fingerprint.
    pub fn parse(&self, label: &str) -> Fingerprint {
        let tokens: Vec<&str> = label.trim().split(' ').collect();
        match tokens.as_slice() {
            [head, tail] => Fingerprint {
                head: self.table.pack(head.as_bytes()),
                tail: self.table.pack(tail.as_bytes()),
            },
            _ => Fingerprint::default(),
        }
    }
}
