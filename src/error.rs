//! Error types for duplicate checking

use bstr::BString;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DupError {
    /// A read too short to hold its head and tail windows
    #[error("record {record}: read of {len} bases is shorter than the {required} required (sequence: {sequence})")]
    ReadTooShort {
        record: u64,
        len: usize,
        required: usize,
        sequence: BString,
    },

    #[error("cannot rewind {source_name} to write out a read for each of the top dups")]
    NotRewindable { source_name: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DupError>;
