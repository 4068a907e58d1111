use noodles::sam::alignment::record_buf::RecordBuf;
use std::io::BufRead;
use tracing::debug;

use crate::core::record::{record_name, RecordSink, RecordSource};
use crate::routing::router::MergeJoinRouter;
use crate::routing::stats::RoutingStats;
use crate::routing::RouteError;

/// Split the merged stream back into its origins.
///
/// Claimed records go, unmodified, to the claiming origin's sink (`sinks` is indexed
/// by origin position). Everything else goes to `unaccounted`. Every input record is
/// written to exactly one sink, and records keep their merged-stream order.
///
/// # Errors
///
/// Returns `RouteError::OriginCountMismatch` if there is not exactly one sink per
/// origin, `RouteError::Read` or `RouteError::CursorRead` on input failures and
/// `RouteError::Write` when a sink rejects a record. Output written so far is kept.
pub fn run_split<S, K, U, R>(
    source: &mut S,
    mut router: MergeJoinRouter<R>,
    sinks: &mut [K],
    unaccounted: &mut U,
) -> Result<RoutingStats, RouteError>
where
    S: RecordSource + ?Sized,
    K: RecordSink,
    U: RecordSink + ?Sized,
    R: BufRead,
{
    if sinks.len() != router.origin_count() {
        return Err(RouteError::OriginCountMismatch {
            kind: "sinks",
            expected: router.origin_count(),
            found: sinks.len(),
        });
    }

    debug!(origins = sinks.len(), "Starting split pass");

    let mut record = RecordBuf::default();
    while source.read_record(&mut record).map_err(RouteError::Read)? {
        match router.claim(record_name(&record))? {
            Some(origin) => sinks[origin.index()]
                .write_record(&record)
                .map_err(|source| RouteError::Write {
                    destination: origin.to_string(),
                    source,
                })?,
            None => unaccounted
                .write_record(&record)
                .map_err(|source| RouteError::Write {
                    destination: "unaccounted output".to_string(),
                    source,
                })?,
        }
    }

    Ok(router.finish())
}
