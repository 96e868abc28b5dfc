//! Human-readable duplicate summary

use crate::algorithm::DupSummary;
use crate::fingerprint::RenderMode;
use crate::utils::{pct_str, with_commas};
use std::io::{self, Write};

/// Totals line, e.g. `1,000 records total. Dups: 12  1.20%`
pub fn write_totals<W: Write>(w: &mut W, records: u64, duplicates: u64) -> io::Result<()> {
    writeln!(
        w,
        "{} records total. Dups: {}  {}",
        with_commas(records),
        with_commas(duplicates),
        pct_str(duplicates, records, 2)
    )
}

/// Per-range tallies with one example each, then the top-N list
pub fn write_summary<W: Write>(
    w: &mut W,
    summary: &DupSummary,
    top_n: usize,
    mode: RenderMode,
) -> io::Result<()> {
    writeln!(w)?;
    for bucket in summary.histogram.sorted_by_tally() {
        writeln!(
            w,
            "{} reads have {} dups\t  e.g., {}",
            bucket.tally,
            bucket.range,
            bucket.example.render(mode)
        )?;
    }

    writeln!(w, "\nTop {} dups", top_n)?;
    for entry in &summary.top {
        writeln!(
            w,
            "{} dups. Match bases: {}",
            entry.count,
            mode.format_label(&entry.label)
        )?;
    }
    Ok(())
}
