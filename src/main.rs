use anyhow::{Context, Result};
use clap::Parser;
use dupchkrs::{Args, DupError, RunConfig, run};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};

#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Exit code when the exemplar pass is refused because the input cannot be re-read
const EXIT_NOT_REWINDABLE: u8 = 2;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = RunConfig::from(Args::parse());

    match check(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<DupError>() {
            Some(DupError::NotRewindable { .. }) => {
                error!("{}", e);
                ExitCode::from(EXIT_NOT_REWINDABLE)
            }
            _ => {
                error!("{:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn check(config: &RunConfig) -> Result<()> {
    let total_start = Instant::now();
    info!("dupchkrs: checking {} for duplicate reads", config.input.name());

    let mut fasta_out: Box<dyn Write> = match &config.fasta_output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };

    let outcome = run(config, &mut std::io::stderr().lock(), &mut fasta_out)?;

    let (total_m, total_s) = dupchkrs::utils::format_duration(total_start.elapsed());
    info!(
        "done in {} min {} sec ({} records, {} dups)",
        total_m, total_s, outcome.records, outcome.duplicates
    );
    Ok(())
}
