use std::io::BufRead;
use tracing::{info, warn};

use crate::core::cursor::OriginCursor;
use crate::core::origin::OriginId;
use crate::routing::stats::RoutingStats;
use crate::routing::RouteError;

/// Records between progress log lines
const PROGRESS_INTERVAL: u64 = 1_000_000;

/// Decides which origin, if any, owns each record of the merged stream.
///
/// Each origin contributes a cursor over its read names, listed in the order its
/// records appear in the merged stream. A record is claimed by the first origin,
/// in declaration order, whose current expected name equals the record name byte
/// for byte. That origin's cursor then moves on to its next name.
///
/// The ordering of the name lists relative to the merged stream is assumed, never
/// checked. If it does not hold, records are silently misattributed or left
/// unclaimed.
pub struct MergeJoinRouter<R> {
    cursors: Vec<OriginCursor<R>>,
    stats: RoutingStats,
}

impl<R: BufRead> MergeJoinRouter<R> {
    /// Build a router from one read-name source per origin, in priority order.
    ///
    /// # Errors
    ///
    /// Returns `RouteError::CursorRead` if a source's first line cannot be read.
    pub fn from_sources(
        sources: impl IntoIterator<Item = R>,
        audit: bool,
    ) -> Result<Self, RouteError> {
        let cursors = sources
            .into_iter()
            .enumerate()
            .map(|(i, source)| {
                let origin = OriginId(i);
                let cursor = OriginCursor::new(origin, source)
                    .map_err(|source| RouteError::CursorRead { origin, source })?;
                Ok(if audit { cursor.with_audit() } else { cursor })
            })
            .collect::<Result<Vec<_>, RouteError>>()?;

        let stats = RoutingStats::new(cursors.len());
        Ok(Self { cursors, stats })
    }

    #[must_use]
    pub fn origin_count(&self) -> usize {
        self.cursors.len()
    }

    /// Match one record name against the origins and advance the claiming cursor.
    ///
    /// Returns the claiming origin, or `None` if the record is unaccounted for.
    ///
    /// # Errors
    ///
    /// Returns `RouteError::CursorRead` if the claiming origin's next name cannot
    /// be read.
    pub fn claim(&mut self, name: &[u8]) -> Result<Option<OriginId>, RouteError> {
        self.stats.records_read += 1;
        if self.stats.records_read % PROGRESS_INTERVAL == 0 {
            info!(records = self.stats.records_read, "Processed records");
        }

        let claimant = self
            .cursors
            .iter_mut()
            .find(|cursor| cursor.peek() == Some(name));

        let Some(cursor) = claimant else {
            self.stats.unaccounted += 1;
            return Ok(None);
        };

        let origin = cursor.origin();
        cursor
            .advance()
            .map_err(|source| RouteError::CursorRead { origin, source })?;
        self.stats.origins[origin.index()].claimed += 1;
        Ok(Some(origin))
    }

    pub(crate) fn stats_mut(&mut self) -> &mut RoutingStats {
        &mut self.stats
    }

    /// End the pass and return its counters.
    ///
    /// Names left in any origin's list are reported here and otherwise dropped.
    #[must_use]
    pub fn finish(mut self) -> RoutingStats {
        for cursor in &self.cursors {
            let origin = cursor.origin();
            let entry = &mut self.stats.origins[origin.index()];
            entry.duplicate_names = cursor.duplicates();

            if let Some(next) = cursor.peek() {
                let next = String::from_utf8_lossy(next).into_owned();
                warn!(
                    origin = %origin,
                    consumed = cursor.consumed(),
                    next_expected = %next,
                    "Merged input ended before all read names of this origin were seen"
                );
                entry.next_expected = Some(next);
            }
        }

        info!(
            records = self.stats.records_read,
            claimed = self.stats.claimed_total(),
            unaccounted = self.stats.unaccounted,
            "Routing complete"
        );

        self.stats
    }
}
