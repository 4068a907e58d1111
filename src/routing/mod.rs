//! The merge-join router and the two passes built on it.
//!
//! - [`router`]: decides which origin claims each merged record
//! - [`split`]: writes each record to its origin's output, or to the unaccounted output
//! - [`remap`]: rewrites reference indices of claimed records into the combined header
//! - [`stats`]: diagnostic counters reported at the end of a pass
//!
//! Both passes read the merged stream exactly once, one record at a time, and never
//! reorder it.

use std::io;
use thiserror::Error;

use crate::core::origin::OriginId;

pub mod remap;
pub mod router;
pub mod split;
pub mod stats;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Failed to read merged input record: {0}")]
    Read(#[source] io::Error),

    #[error("Failed to write record to {destination}: {source}")]
    Write {
        destination: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read next read name for {origin}: {source}")]
    CursorRead {
        origin: OriginId,
        #[source]
        source: io::Error,
    },

    #[error("{found} {kind} given for {expected} origins")]
    OriginCountMismatch {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Record '{name}' claimed by {origin} has reference index {index}, but the origin header has only {len} reference sequences")]
    ReferenceIndexOutOfRange {
        name: String,
        origin: OriginId,
        index: usize,
        len: usize,
    },
}

pub use remap::run_remap;
pub use router::MergeJoinRouter;
pub use split::run_split;
pub use stats::{OriginStats, RoutingStats};
