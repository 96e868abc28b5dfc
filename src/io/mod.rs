//! FASTQ input and exemplar output
//!
//! Input is a plain or gzip-compressed FASTQ file (detected by magic bytes),
//! or stdin when the path is `-`. Only files can be reopened for a second
//! pass.

use crate::error::{DupError, Result};
use flate2::bufread::MultiGzDecoder;
use noodles::fastq;
use std::cell::Cell;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const BUFFER_SIZE: usize = 1 << 20;

/// Where reads come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    /// `-` means stdin, anything else is a path
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(arg))
        }
    }

    pub fn name(&self) -> String {
        match self {
            InputSource::File(path) => path.display().to_string(),
            InputSource::Stdin => "stdin".to_string(),
        }
    }

    #[inline]
    pub fn is_rewindable(&self) -> bool {
        matches!(self, InputSource::File(_))
    }

    /// Open for the counting pass
    pub fn open(&self) -> Result<OpenedInput> {
        match self {
            InputSource::File(path) => open_file(path),
            InputSource::Stdin => {
                let buffered = BufReader::with_capacity(BUFFER_SIZE, io::stdin());
                Ok(OpenedInput {
                    reader: SequenceReader::new(maybe_gunzip(buffered)?),
                    bytes_read: Rc::new(Cell::new(0)),
                    total_bytes: None,
                })
            }
        }
    }

    /// Open again from the start for the exemplar pass
    pub fn reopen(&self) -> Result<SequenceReader<Box<dyn BufRead>>> {
        match self {
            InputSource::File(path) => Ok(open_file(path)?.reader),
            InputSource::Stdin => Err(DupError::NotRewindable {
                source_name: self.name(),
            }),
        }
    }
}

/// An open input plus what progress reporting needs to know about it
pub struct OpenedInput {
    pub reader: SequenceReader<Box<dyn BufRead>>,
    /// Raw (possibly compressed) bytes consumed so far
    pub bytes_read: Rc<Cell<u64>>,
    /// Raw input size, when known
    pub total_bytes: Option<u64>,
}

fn open_file(path: &Path) -> Result<OpenedInput> {
    let file = File::open(path)?;
    let total_bytes = file.metadata().ok().map(|m| m.len());
    let bytes_read = Rc::new(Cell::new(0));
    let counting = CountingReader::new(file, bytes_read.clone());
    let buffered = BufReader::with_capacity(BUFFER_SIZE, counting);
    Ok(OpenedInput {
        reader: SequenceReader::new(maybe_gunzip(buffered)?),
        bytes_read,
        total_bytes,
    })
}

/// Wrap `inner` in a gzip decoder if it starts with the gzip magic bytes
fn maybe_gunzip<R: BufRead + 'static>(mut inner: R) -> io::Result<Box<dyn BufRead>> {
    let is_gzipped = inner.fill_buf()?.starts_with(&GZIP_MAGIC);
    if is_gzipped {
        Ok(Box::new(BufReader::with_capacity(
            BUFFER_SIZE,
            MultiGzDecoder::new(inner),
        )))
    } else {
        Ok(Box::new(inner))
    }
}

/// Reader that tallies the bytes passing through it
pub struct CountingReader<R> {
    inner: R,
    count: Rc<Cell<u64>>,
}

impl<R> CountingReader<R> {
    pub fn new(inner: R, count: Rc<Cell<u64>>) -> Self {
        Self { inner, count }
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count.set(self.count.get() + n as u64);
        Ok(n)
    }
}

/// Yields the sequence line of each FASTQ record, reusing one record buffer
pub struct SequenceReader<R> {
    inner: fastq::io::Reader<R>,
    record: fastq::Record,
}

impl<R: BufRead> SequenceReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner: fastq::io::Reader::new(inner),
            record: fastq::Record::default(),
        }
    }

    /// Next sequence line, `None` at end of input
    #[inline]
    pub fn next_sequence(&mut self) -> io::Result<Option<&[u8]>> {
        match self.inner.read_record(&mut self.record)? {
            0 => Ok(None),
            _ => Ok(Some(self.record.sequence())),
        }
    }
}

/// Write one exemplar as `>{count}_dups {label}` followed by the raw read
pub fn write_exemplar<W: Write>(w: &mut W, count: u64, label: &str, seq: &[u8]) -> io::Result<()> {
    writeln!(w, ">{}_dups {}", count, label)?;
    w.write_all(seq)?;
    w.write_all(b"\n")
}
