use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::cli::{finish_writer, open_read_names, print_summary, write_header, OutputFormat};
use crate::core::origin::SplitOriginSpec;
use crate::parsing::sam::{read_header_template, AlignmentReader, AlignmentWriter};
use crate::routing::{run_split, MergeJoinRouter};
use crate::utils::validation::check_output_paths;

#[derive(Args)]
pub struct SplitArgs {
    /// Merged input (BAM or SAM)
    #[arg(required = true)]
    pub merged: PathBuf,

    /// Header template (SAM, BAM or CRAM) for the unaccounted output
    #[arg(required = true)]
    pub unaccounted_header: PathBuf,

    /// Output for records no origin claims (BAM, or SAM with a .sam extension)
    #[arg(required = true)]
    pub unaccounted: PathBuf,

    /// One `<read_names.txt>:<header.sam>:<output.bam>` per origin, highest priority first
    #[arg(required = true, num_args = 1.., value_name = "NAMES:HEADER:OUTPUT")]
    pub origins: Vec<SplitOriginSpec>,

    /// Warn about read names repeated on consecutive lines of a read-name list
    #[arg(long)]
    pub audit_identifiers: bool,
}

/// Execute split subcommand
///
/// # Errors
///
/// Returns an error if any input or output cannot be opened, a header cannot be
/// written, or a record cannot be read or written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SplitArgs, format: OutputFormat) -> anyhow::Result<()> {
    check_output_paths(
        &args.merged,
        std::iter::once(args.unaccounted.as_path())
            .chain(args.origins.iter().map(|o| o.output.as_path())),
    )?;

    let mut merged = AlignmentReader::open(&args.merged)
        .with_context(|| format!("Failed to open merged input {}", args.merged.display()))?;

    let unaccounted_header = read_header_template(&args.unaccounted_header).with_context(|| {
        format!(
            "Failed to read unaccounted header {}",
            args.unaccounted_header.display()
        )
    })?;

    // Every input is opened before the first output is created (and truncated)
    let mut read_names = Vec::with_capacity(args.origins.len());
    let mut origin_headers = Vec::with_capacity(args.origins.len());
    for spec in &args.origins {
        read_names.push(open_read_names(&spec.read_names)?);
        origin_headers.push(
            read_header_template(&spec.header)
                .with_context(|| format!("Failed to read origin header {}", spec.header.display()))?,
        );
    }

    let mut unaccounted = AlignmentWriter::create(&args.unaccounted, unaccounted_header)
        .with_context(|| format!("Failed to create {}", args.unaccounted.display()))?;

    let mut sinks = Vec::with_capacity(args.origins.len());
    for (spec, header) in args.origins.iter().zip(origin_headers) {
        sinks.push(
            AlignmentWriter::create(&spec.output, header)
                .with_context(|| format!("Failed to create {}", spec.output.display()))?,
        );
    }

    write_header(&mut unaccounted)?;
    for sink in &mut sinks {
        write_header(sink)?;
    }

    info!(
        merged = %merged.path().display(),
        references = merged.header().reference_sequences().len(),
        origins = args.origins.len(),
        "Splitting merged input"
    );

    let router = MergeJoinRouter::from_sources(read_names, args.audit_identifiers)?;
    let stats = run_split(&mut merged, router, &mut sinks, &mut unaccounted)
        .with_context(|| format!("Failed to split {}", args.merged.display()))?;

    finish_writer(unaccounted)?;
    for sink in sinks {
        finish_writer(sink)?;
    }

    let names: Vec<String> = args
        .origins
        .iter()
        .map(|o| o.read_names.display().to_string())
        .collect();
    print_summary("split", &stats, &names, format)
}
