use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use crate::cli::{finish_writer, open_read_names, print_summary, write_header, OutputFormat};
use crate::core::origin::RemapOriginSpec;
use crate::core::translation::{TranslationPolicy, TranslationTable};
use crate::parsing::sam::{read_header_template, AlignmentReader, AlignmentWriter};
use crate::routing::{run_remap, MergeJoinRouter};
use crate::utils::validation::check_output_paths;

#[derive(Args)]
pub struct RemapArgs {
    /// Header template (SAM, BAM or CRAM) of the combined output
    #[arg(required = true)]
    pub combined_header: PathBuf,

    /// Merged input (BAM or SAM)
    #[arg(required = true)]
    pub merged: PathBuf,

    /// One `<read_names.txt>:<header.sam>:<translation.tsv>` per origin, highest priority first
    #[arg(required = true, num_args = 1.., value_name = "NAMES:HEADER:TRANSLATION")]
    pub origins: Vec<RemapOriginSpec>,

    /// Remapped output (BAM, or SAM with a .sam extension)
    #[arg(required = true)]
    pub output: PathBuf,

    /// Leave reference ids untouched when a translation file does not map every
    /// reference sequence, instead of failing
    #[arg(long)]
    pub allow_incomplete_translation: bool,

    /// Warn about read names repeated on consecutive lines of a read-name list
    #[arg(long)]
    pub audit_identifiers: bool,
}

/// Execute remap subcommand
///
/// # Errors
///
/// Returns an error if any input or output cannot be opened, a translation table
/// is incomplete, a header cannot be written, or a record cannot be read,
/// translated or written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: RemapArgs, format: OutputFormat) -> anyhow::Result<()> {
    check_output_paths(&args.merged, std::iter::once(args.output.as_path()))?;

    let policy = if args.allow_incomplete_translation {
        warn!("Incomplete translation tables are allowed; unmapped reference ids pass through unchanged");
        TranslationPolicy::AllowIncomplete
    } else {
        TranslationPolicy::Strict
    };

    let combined_header = read_header_template(&args.combined_header).with_context(|| {
        format!(
            "Failed to read combined header {}",
            args.combined_header.display()
        )
    })?;

    let mut merged = AlignmentReader::open(&args.merged)
        .with_context(|| format!("Failed to open merged input {}", args.merged.display()))?;

    let mut read_names = Vec::with_capacity(args.origins.len());
    let mut tables = Vec::with_capacity(args.origins.len());
    for spec in &args.origins {
        read_names.push(open_read_names(&spec.read_names)?);

        let origin_header = read_header_template(&spec.header)
            .with_context(|| format!("Failed to read origin header {}", spec.header.display()))?;
        let translation = File::open(&spec.translation)
            .map(BufReader::new)
            .with_context(|| {
                format!(
                    "Failed to open translation file {}",
                    spec.translation.display()
                )
            })?;
        let table = TranslationTable::build(translation, &origin_header, &combined_header, policy)
            .with_context(|| {
                format!(
                    "Invalid translation file {}",
                    spec.translation.display()
                )
            })?;
        tables.push(table);
    }

    let mut output = AlignmentWriter::create(&args.output, combined_header)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    write_header(&mut output)?;

    info!(
        merged = %merged.path().display(),
        references = merged.header().reference_sequences().len(),
        origins = args.origins.len(),
        "Remapping merged input"
    );

    let router = MergeJoinRouter::from_sources(read_names, args.audit_identifiers)?;
    let stats = run_remap(&mut merged, router, &tables, &mut output)
        .with_context(|| format!("Failed to remap {}", args.merged.display()))?;

    finish_writer(output)?;

    let names: Vec<String> = args
        .origins
        .iter()
        .map(|o| o.read_names.display().to_string())
        .collect();
    print_summary("remap", &stats, &names, format)
}
