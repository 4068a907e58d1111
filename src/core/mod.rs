//! Core data types for reconciling a merged alignment stream with its origins.
//!
//! - [`OriginId`]: stable position of an origin, which is also its matching priority
//! - [`OriginCursor`]: the next read name an origin expects to see
//! - [`TranslationTable`]: origin reference index to combined reference index
//! - [`RecordSource`], [`RecordSink`]: the record I/O seams the router is written against
//!
//! [`OriginId`]: origin::OriginId
//! [`OriginCursor`]: cursor::OriginCursor
//! [`TranslationTable`]: translation::TranslationTable
//! [`RecordSource`]: record::RecordSource
//! [`RecordSink`]: record::RecordSink

pub mod cursor;
pub mod origin;
pub mod record;
pub mod translation;
