//! Centralized validation and helper functions.

use noodles::sam::Header;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Validation error types for command-line inputs
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Output path used more than once: {0}")]
    DuplicateOutput(PathBuf),
    #[error("Output path would overwrite the merged input: {0}")]
    OutputIsInput(PathBuf),
}

/// Remove a trailing `\n` or `\r\n` from a line.
///
/// # Examples
///
/// ```
/// use bam_untangle::utils::validation::strip_line_terminator;
///
/// assert_eq!(strip_line_terminator(b"read1\n"), b"read1");
/// assert_eq!(strip_line_terminator(b"read1\r\n"), b"read1");
/// assert_eq!(strip_line_terminator(b"read1"), b"read1");
/// ```
#[must_use]
pub fn strip_line_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Index of a reference sequence by exact name, scanning the header in order.
#[must_use]
pub fn find_reference_index(header: &Header, name: &[u8]) -> Option<usize> {
    header
        .reference_sequences()
        .keys()
        .position(|candidate| candidate.as_slice() == name)
}

/// Reference-sequence names of a header, in index order, for log and error messages.
#[must_use]
pub fn reference_names(header: &Header) -> Vec<String> {
    header
        .reference_sequences()
        .keys()
        .map(ToString::to_string)
        .collect()
}

/// Check that no two outputs share a path and that none overwrites the merged input.
///
/// Paths are compared as given; no canonicalization happens since outputs may not
/// exist yet.
///
/// # Errors
///
/// Returns `ValidationError::OutputIsInput` or `ValidationError::DuplicateOutput`
/// for the first offending path.
pub fn check_output_paths<'a>(
    input: &Path,
    outputs: impl IntoIterator<Item = &'a Path>,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for output in outputs {
        if output == input {
            return Err(ValidationError::OutputIsInput(output.to_path_buf()));
        }
        if !seen.insert(output) {
            return Err(ValidationError::DuplicateOutput(output.to_path_buf()));
        }
    }
    Ok(())
}
