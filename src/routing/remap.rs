use noodles::sam::alignment::record_buf::RecordBuf;
use std::io::BufRead;
use tracing::debug;

use crate::core::origin::OriginId;
use crate::core::record::{record_name, RecordSink, RecordSource};
use crate::core::translation::TranslationTable;
use crate::routing::router::MergeJoinRouter;
use crate::routing::stats::RoutingStats;
use crate::routing::RouteError;

/// Rewrite reference indices of claimed records into the combined header's space.
///
/// For a claimed record, the reference and mate reference indices are each
/// translated through the claiming origin's table (`tables` is indexed by origin
/// position) unless unmapped. Unclaimed records are written through untouched:
/// unlike the split pass there is no separate output for them, since every record
/// is expected to belong to some origin.
///
/// # Errors
///
/// Returns `RouteError::OriginCountMismatch` if there is not exactly one table per
/// origin, `RouteError::Read` or `RouteError::CursorRead` on input failures,
/// `RouteError::Write` when the output rejects a record, and
/// `RouteError::ReferenceIndexOutOfRange` when a claimed record refers to a
/// reference sequence its origin header does not have.
pub fn run_remap<S, K, R>(
    source: &mut S,
    mut router: MergeJoinRouter<R>,
    tables: &[TranslationTable],
    output: &mut K,
) -> Result<RoutingStats, RouteError>
where
    S: RecordSource + ?Sized,
    K: RecordSink + ?Sized,
    R: BufRead,
{
    if tables.len() != router.origin_count() {
        return Err(RouteError::OriginCountMismatch {
            kind: "translation tables",
            expected: router.origin_count(),
            found: tables.len(),
        });
    }

    debug!(origins = tables.len(), "Starting remap pass");

    let mut record = RecordBuf::default();
    while source.read_record(&mut record).map_err(RouteError::Read)? {
        if let Some(origin) = router.claim(record_name(&record))? {
            let counts = remap_record(&mut record, origin, &tables[origin.index()])?;
            let stats = router.stats_mut();
            stats.references_rewritten += counts.rewritten;
            stats.references_untranslated += counts.untranslated;
        }

        output
            .write_record(&record)
            .map_err(|source| RouteError::Write {
                destination: "combined output".to_string(),
                source,
            })?;
    }

    Ok(router.finish())
}

#[derive(Debug, Default, PartialEq, Eq)]
struct RemapCounts {
    rewritten: u64,
    untranslated: u64,
}

fn remap_record(
    record: &mut RecordBuf,
    origin: OriginId,
    table: &TranslationTable,
) -> Result<RemapCounts, RouteError> {
    let mut counts = RemapCounts::default();

    let primary = translate_field(record.reference_sequence_id(), record, origin, table, &mut counts)?;
    *record.reference_sequence_id_mut() = primary;

    let mate = translate_field(record.mate_reference_sequence_id(), record, origin, table, &mut counts)?;
    *record.mate_reference_sequence_id_mut() = mate;

    Ok(counts)
}

/// Translate one reference index. Unmapped stays unmapped; an unset slot keeps the
/// original index.
fn translate_field(
    local: Option<usize>,
    record: &RecordBuf,
    origin: OriginId,
    table: &TranslationTable,
    counts: &mut RemapCounts,
) -> Result<Option<usize>, RouteError> {
    let Some(local) = local else {
        return Ok(None);
    };

    if local >= table.len() {
        return Err(RouteError::ReferenceIndexOutOfRange {
            name: String::from_utf8_lossy(record_name(record)).into_owned(),
            origin,
            index: local,
            len: table.len(),
        });
    }

    match table.translate(local) {
        Some(target) => {
            counts.rewritten += 1;
            Ok(Some(target))
        }
        None => {
            counts.untranslated += 1;
            Ok(Some(local))
        }
    }
}
