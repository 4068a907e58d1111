use bstr::ByteSlice;
use std::io::{self, BufRead};
use tracing::warn;

use crate::core::origin::OriginId;
use crate::utils::validation::strip_line_terminator;

/// The next read name an origin expects to see in the merged stream.
///
/// Wraps the origin's read-name list (one name per line). The cursor holds at most
/// one name at a time; once the list is consumed it is exhausted for good.
pub struct OriginCursor<R> {
    origin: OriginId,
    reader: R,
    current: Option<Vec<u8>>,
    consumed: u64,
    audit: Option<IdentifierAudit>,
}

/// Adjacent-duplicate bookkeeping for `--audit-identifiers`
#[derive(Debug, Default)]
struct IdentifierAudit {
    previous: Vec<u8>,
    duplicates: u64,
}

impl<R: BufRead> OriginCursor<R> {
    /// Create a cursor and load its first expected name.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the first line cannot be read.
    pub fn new(origin: OriginId, reader: R) -> io::Result<Self> {
        let mut cursor = Self {
            origin,
            reader,
            current: Some(Vec::new()),
            consumed: 0,
            audit: None,
        };
        cursor.load_next()?;
        Ok(cursor)
    }

    /// Flag adjacent duplicate names as they are loaded. Does not change matching.
    #[must_use]
    pub fn with_audit(mut self) -> Self {
        let previous = self.current.clone().unwrap_or_default();
        self.audit = Some(IdentifierAudit {
            previous,
            duplicates: 0,
        });
        self
    }

    #[must_use]
    pub fn origin(&self) -> OriginId {
        self.origin
    }

    /// Current expected name, or `None` once exhausted
    #[must_use]
    pub fn peek(&self) -> Option<&[u8]> {
        self.current.as_deref()
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.current.is_none()
    }

    /// Number of names claimed so far
    #[must_use]
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Adjacent duplicates seen by the audit (always 0 when auditing is off)
    #[must_use]
    pub fn duplicates(&self) -> u64 {
        self.audit.as_ref().map_or(0, |a| a.duplicates)
    }

    /// Drop the current name and load the next one. No-op once exhausted.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the next line cannot be read.
    pub fn advance(&mut self) -> io::Result<()> {
        if self.current.is_none() {
            return Ok(());
        }
        self.consumed += 1;
        self.load_next()
    }

    fn load_next(&mut self) -> io::Result<()> {
        let Some(buf) = self.current.as_mut() else {
            return Ok(());
        };

        buf.clear();
        if self.reader.read_until(b'\n', buf)? == 0 {
            self.current = None;
            return Ok(());
        }
        let len = strip_line_terminator(buf).len();
        buf.truncate(len);

        if let Some(audit) = self.audit.as_mut() {
            if audit.previous == *buf {
                audit.duplicates += 1;
                warn!(
                    origin = %self.origin,
                    name = %buf.as_bstr(),
                    "Read name repeated on consecutive lines"
                );
            }
            audit.previous.clone_from(buf);
        }

        Ok(())
    }
}
