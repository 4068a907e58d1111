use noodles::sam::Header;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{debug, warn};

use crate::parsing::tsv::{for_each_line, parse_name_pair};
use crate::utils::validation::{find_reference_index, reference_names};

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Incomplete translation table: {found} of {expected} reference sequences mapped (missing: {})", .missing.join(", "))]
    IncompleteTranslationTable {
        expected: usize,
        found: usize,
        missing: Vec<String>,
    },

    #[error("Reference sequence '{name}' not found in {header} header (line {line})")]
    MappingNotFound {
        name: String,
        header: HeaderRole,
        line: usize,
    },

    #[error("Malformed translation line {line}: expected two tab-separated names, got '{content}'")]
    MalformedLine { line: usize, content: String },
}

/// Which header a name failed to resolve against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRole {
    Origin,
    Combined,
}

impl std::fmt::Display for HeaderRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Origin => write!(f, "origin"),
            Self::Combined => write!(f, "combined"),
        }
    }
}

/// What to do when a translation file cannot map every origin reference sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslationPolicy {
    /// Missing or unresolvable names are fatal
    #[default]
    Strict,
    /// Log and leave the affected slots unset
    AllowIncomplete,
}

/// Maps an origin's reference-sequence indices to the combined header's indices.
///
/// Built once from a translation file and immutable afterwards. A slot that was
/// never assigned translates to `None`, never to index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationTable {
    slots: Vec<Option<usize>>,
}

impl TranslationTable {
    /// Build a table from `local_name<TAB>combined_name` lines.
    ///
    /// Exactly as many lines are consumed as the origin header declares reference
    /// sequences; anything after that is ignored.
    ///
    /// # Errors
    ///
    /// Returns `TranslationError::Io` on read failure. Under
    /// `TranslationPolicy::Strict` also returns `MalformedLine`, `MappingNotFound`
    /// or `IncompleteTranslationTable` for the first problem found.
    pub fn build<R: BufRead>(
        reader: R,
        origin: &Header,
        combined: &Header,
        policy: TranslationPolicy,
    ) -> Result<Self, TranslationError> {
        let n_targets = origin.reference_sequences().len();
        let mut slots = vec![None; n_targets];

        let lines_read = for_each_line(reader, n_targets, |line_num, line| {
            match resolve_line(line_num, line, origin, combined) {
                Ok((local, target)) => {
                    slots[local] = Some(target);
                    Ok(())
                }
                Err(e) if policy == TranslationPolicy::AllowIncomplete => {
                    warn!(error = %e, "Skipping translation line");
                    Ok(())
                }
                Err(e) => Err(e),
            }
        })?;

        let table = Self { slots };
        let missing = table.unmapped_names(origin);

        if !missing.is_empty() {
            let err = TranslationError::IncompleteTranslationTable {
                expected: n_targets,
                found: n_targets - missing.len(),
                missing,
            };
            match policy {
                TranslationPolicy::Strict => return Err(err),
                TranslationPolicy::AllowIncomplete => warn!(error = %err, "Continuing with unset slots"),
            }
        }

        debug!(lines = lines_read, targets = n_targets, "Built translation table");
        Ok(table)
    }

    /// Combined index for a local index, or `None` if unknown or unset
    #[must_use]
    pub fn translate(&self, local: usize) -> Option<usize> {
        self.slots.get(local).copied().flatten()
    }

    /// Number of origin reference sequences covered (mapped or not)
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn unmapped_names(&self, origin: &Header) -> Vec<String> {
        reference_names(origin)
            .into_iter()
            .zip(&self.slots)
            .filter(|(_, slot)| slot.is_none())
            .map(|(name, _)| name)
            .collect()
    }
}

#[cfg(test)]
impl TranslationTable {
    pub(crate) fn from_slots(slots: Vec<Option<usize>>) -> Self {
        Self { slots }
    }
}

fn resolve_line(
    line_num: usize,
    line: &[u8],
    origin: &Header,
    combined: &Header,
) -> Result<(usize, usize), TranslationError> {
    let pair = parse_name_pair(line).ok_or_else(|| TranslationError::MalformedLine {
        line: line_num,
        content: String::from_utf8_lossy(line).trim_end().to_string(),
    })?;

    let lookup = |header: &Header, name: &[u8], role: HeaderRole| {
        find_reference_index(header, name).ok_or_else(|| TranslationError::MappingNotFound {
            name: String::from_utf8_lossy(name).into_owned(),
            header: role,
            line: line_num,
        })
    };

    let local = lookup(origin, pair.local, HeaderRole::Origin)?;
    let target = lookup(combined, pair.combined, HeaderRole::Combined)?;
    Ok((local, target))
}
