//! # bam-untangle
//!
//! Reconcile a merged BAM with the inputs it was merged from.
//!
//! When several BAMs are merged, each origin's records end up interleaved in one
//! stream. Given each origin's read names, listed in the order they appear in the
//! merged file, `bam-untangle` can:
//!
//! - **split**: route every merged record back to its origin's output, with records
//!   that match no origin sent to a separate "unaccounted" output
//! - **remap**: rewrite the reference and mate reference indices of each record from
//!   its origin's header into a combined header, so origins aligned against
//!   differently ordered references can share one coordinate space
//!
//! Matching is a merge-join: each origin has a cursor on its next expected name, and
//! a record is claimed by the first origin (in command-line order) whose cursor
//! matches it. The name lists must follow merged-stream order; this is not checked.
//!
//! ## Example
//!
//! ```rust
//! use bam_untangle::core::origin::OriginId;
//! use bam_untangle::routing::MergeJoinRouter;
//! use std::io::Cursor;
//!
//! let lists = vec![Cursor::new("r1\nr3\n"), Cursor::new("r2\n")];
//! let mut router = MergeJoinRouter::from_sources(lists, false).unwrap();
//!
//! assert_eq!(router.claim(b"r1").unwrap(), Some(OriginId(0)));
//! assert_eq!(router.claim(b"r2").unwrap(), Some(OriginId(1)));
//! assert_eq!(router.claim(b"r9").unwrap(), None);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: origins, cursors, translation tables and record I/O traits
//! - [`routing`]: the merge-join router and the split and remap passes
//! - [`parsing`]: SAM/BAM/CRAM I/O and translation-file parsing
//! - [`cli`]: command-line interface implementation

pub mod cli;
pub mod core;
pub mod parsing;
pub mod routing;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::cursor::OriginCursor;
pub use core::origin::OriginId;
pub use core::translation::{TranslationPolicy, TranslationTable};
pub use routing::{MergeJoinRouter, RoutingStats};
