//! Command-line interface for bam-untangle.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **split**: Route each merged record back to its origin's output
//! - **remap**: Rewrite reference indices of merged records into a combined header
//!
//! ## Usage
//!
//! ```text
//! # Split a merged BAM into its two inputs
//! bam-untangle split merged.bam unaccounted_header.sam unaccounted.bam \
//!     a_names.txt:a_header.sam:a.bam b_names.txt:b_header.sam:b.bam
//!
//! # Remap two origins into the combined header
//! bam-untangle remap combined_header.sam merged.bam \
//!     a_names.txt:a_header.sam:a_to_combined.tsv \
//!     b_names.txt:b_header.sam:b_to_combined.tsv \
//!     remapped.bam
//!
//! # Machine-readable summary
//! bam-untangle --format json split ...
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

use crate::parsing::sam::AlignmentWriter;
use crate::routing::RoutingStats;

pub mod remap;
pub mod split;

#[derive(Parser)]
#[command(name = "bam-untangle")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Split a merged BAM back into its origins, or remap its reference ids")]
#[command(
    long_about = "bam-untangle reconciles a merged BAM with per-origin read-name lists.\n\nEach read-name list must follow the order in which that origin's records appear in the merged file. Records are claimed by the first origin, in command-line order, whose next expected name matches.\n\n- split: write each record to its origin's output, or to an unaccounted output\n- remap: translate reference and mate reference indices into a combined header"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Format of the summary printed after the pass
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a merged BAM into per-origin BAMs
    Split(split::SplitArgs),

    /// Rewrite reference ids of a merged BAM into a combined header
    Remap(remap::RemapArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Open an origin's read-name list.
pub(crate) fn open_read_names(path: &Path) -> anyhow::Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .with_context(|| format!("Failed to open read name list {}", path.display()))
}

/// Write a destination's header; failure aborts before any record is routed.
pub(crate) fn write_header(writer: &mut AlignmentWriter) -> anyhow::Result<()> {
    writer
        .write_header()
        .with_context(|| format!("Failed to write header to {}", writer.path().display()))?;
    debug!(
        path = %writer.path().display(),
        references = writer.header().reference_sequences().len(),
        "Wrote header"
    );
    Ok(())
}

/// Flush and close an output.
pub(crate) fn finish_writer(writer: AlignmentWriter) -> anyhow::Result<()> {
    let path = writer.path().to_path_buf();
    writer
        .finish()
        .with_context(|| format!("Failed to finish {}", path.display()))
}

/// One origin of a pass, for the summary
#[derive(Debug, Serialize)]
pub struct OriginSummary {
    pub origin: usize,
    pub read_names: String,
    pub claimed: u64,
    pub duplicate_names: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_expected: Option<String>,
}

/// Print the end-of-pass diagnostics on stdout.
///
/// `read_names` holds the read-name list path of each origin, in origin order.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print_summary(
    command: &str,
    stats: &RoutingStats,
    read_names: &[String],
    format: OutputFormat,
) -> anyhow::Result<()> {
    let origins: Vec<OriginSummary> = stats
        .origins
        .iter()
        .zip(read_names)
        .enumerate()
        .map(|(i, (o, path))| OriginSummary {
            origin: i + 1,
            read_names: path.clone(),
            claimed: o.claimed,
            duplicate_names: o.duplicate_names,
            next_expected: o.next_expected.clone(),
        })
        .collect();

    match format {
        OutputFormat::Text => print_text_summary(command, stats, &origins),
        OutputFormat::Json => print_json_summary(command, stats, &origins)?,
        OutputFormat::Tsv => print_tsv_summary(&origins, stats),
    }

    Ok(())
}

fn print_text_summary(command: &str, stats: &RoutingStats, origins: &[OriginSummary]) {
    println!("{command} summary");
    println!("{}", "=".repeat(60));
    println!("  Records read: {}", stats.records_read);
    println!("  Records claimed: {}", stats.claimed_total());
    println!("  Records unaccounted: {}", stats.unaccounted);
    if command == "remap" {
        println!("  Reference fields rewritten: {}", stats.references_rewritten);
        if stats.references_untranslated > 0 {
            println!(
                "  Reference fields left untranslated: {}",
                stats.references_untranslated
            );
        }
    }

    let leftovers = stats.origins_with_leftovers();
    if !leftovers.is_empty() {
        println!("  Origins with unconsumed read names: {}", leftovers.len());
    }

    for o in origins {
        println!("\nOrigin {}: {}", o.origin, o.read_names);
        println!("  Claimed: {}", o.claimed);
        if o.duplicate_names > 0 {
            println!("  Adjacent duplicate names: {}", o.duplicate_names);
        }
        if let Some(next) = &o.next_expected {
            println!("  Unconsumed read names, starting at: {next}");
        }
    }
}

fn print_json_summary(
    command: &str,
    stats: &RoutingStats,
    origins: &[OriginSummary],
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "command": command,
        "records_read": stats.records_read,
        "records_claimed": stats.claimed_total(),
        "records_unaccounted": stats.unaccounted,
        "references_rewritten": stats.references_rewritten,
        "references_untranslated": stats.references_untranslated,
        "origins": origins,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_summary(origins: &[OriginSummary], stats: &RoutingStats) {
    println!("origin\tread_names\tclaimed\tduplicate_names\tleftover");
    for o in origins {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            o.origin,
            o.read_names,
            o.claimed,
            o.duplicate_names,
            o.next_expected.is_some(),
        );
    }
    println!("unaccounted\t-\t{}\t0\tfalse", stats.unaccounted);
}
