//! Readers and writers for the files bam-untangle consumes and produces.
//!
//! - **SAM/BAM/CRAM files**: header templates, the merged record stream, and the
//!   per-origin, unaccounted or remapped outputs
//! - **Translation files**: tab-separated `<origin name>\t<combined name>` lines
//!
//! ## Example
//!
//! ```rust,no_run
//! use bam_untangle::parsing::sam::{read_header_template, AlignmentReader};
//! use std::path::Path;
//!
//! // Any of SAM, BAM or CRAM can supply a header
//! let header = read_header_template(Path::new("origin_a.cram")).unwrap();
//! println!("{} reference sequences", header.reference_sequences().len());
//!
//! // Records are streamed from BAM or SAM
//! let merged = AlignmentReader::open(Path::new("merged.bam")).unwrap();
//! ```
//!
//! ## Format selection
//!
//! | Extension | Input | Output |
//! |-----------|-------|--------|
//! | `.bam` | records and headers | BAM |
//! | `.sam` | records and headers | SAM |
//! | `.cram` | headers only | rejected |
//! | none | SAM | SAM |
//! | other | rejected | BAM |

pub mod sam;
pub mod tsv;
