// Command-line argument parsing
use crate::fingerprint::RenderMode;
use crate::io::InputSource;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dupchkrs",
    version,
    about = "Find duplicate reads by their first and last 21 bases",
    long_about = "Checks a FASTQ file for duplicate reads by looking at the first 21 bases and the last 21 bases\n\
                  of each read. Reads that share this fingerprint are counted as duplicates."
)]
pub struct Args {
    /// FASTQ file, plain or gzipped ('-' for stdin)
    pub input: String,
    /// Characters to skip at the start of each read before the head window
    #[arg(short, long, default_value_t = 0)]
    pub skip: usize,
    /// How many of the most frequent duplicates to show
    #[arg(short = 'n', long, default_value_t = 5)]
    pub top_n: usize,
    /// Show fingerprints as grep patterns (^HEAD.*TAIL$)
    #[arg(short, long)]
    pub grep: bool,
    /// Write one read per top duplicate in FASTA format (needs a file input)
    #[arg(long = "fa", alias = "fasta")]
    pub fasta: bool,
    /// Where to write the FASTA reads (default stdout)
    #[arg(short = 'o', long, requires = "fasta")]
    pub fasta_output: Option<PathBuf>,
    /// Records between progress checks (0 disables progress)
    #[arg(long, default_value_t = 100_000)]
    pub progress_every: u64,
}

/// Settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input: InputSource,
    pub skip: usize,
    pub top_n: usize,
    pub render_mode: RenderMode,
    pub emit_fasta: bool,
    pub fasta_output: Option<PathBuf>,
    pub progress_every: u64,
}

impl RunConfig {
    pub fn new(input: InputSource) -> Self {
        Self {
            input,
            skip: 0,
            top_n: 5,
            render_mode: RenderMode::Plain,
            emit_fasta: false,
            fasta_output: None,
            progress_every: 100_000,
        }
    }
}

impl From<Args> for RunConfig {
    fn from(args: Args) -> Self {
        Self {
            input: InputSource::from_arg(&args.input),
            skip: args.skip,
            top_n: args.top_n,
            render_mode: if args.grep {
                RenderMode::Pattern
            } else {
                RenderMode::Plain
            },
            emit_fasta: args.fasta,
            fasta_output: args.fasta_output,
            progress_every: args.progress_every,
        }
    }
}
