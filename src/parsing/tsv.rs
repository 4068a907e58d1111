use std::io::{self, BufRead};

use crate::utils::validation::strip_line_terminator;

/// One line of a translation file: `local_name<TAB>combined_name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePair<'a> {
    pub local: &'a [u8],
    pub combined: &'a [u8],
}

/// Split a translation line at its first tab.
///
/// The line terminator is stripped from the combined name. Anything after the
/// first tab, including further tabs, belongs to the combined name. Returns `None`
/// when the line has no tab.
#[must_use]
pub fn parse_name_pair(line: &[u8]) -> Option<NamePair<'_>> {
    let tab = line.iter().position(|&b| b == b'\t')?;
    Some(NamePair {
        local: &line[..tab],
        combined: strip_line_terminator(&line[tab + 1..]),
    })
}

/// Read up to `limit` raw lines, handing each to `f` with its 1-based line number.
///
/// Stops early at end of input. Returns the number of lines read.
///
/// # Errors
///
/// Returns the first I/O error, or the first error produced by `f`.
pub fn for_each_line<R, E, F>(mut reader: R, limit: usize, mut f: F) -> Result<usize, E>
where
    R: BufRead,
    E: From<io::Error>,
    F: FnMut(usize, &[u8]) -> Result<(), E>,
{
    let mut line = Vec::new();
    let mut count = 0;

    while count < limit {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        count += 1;
        f(count, &line)?;
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_name_pair() {
        let pair = parse_name_pair(b"1\tchr1\n").unwrap();
        assert_eq!(pair.local, b"1");
        assert_eq!(pair.combined, b"chr1");
    }

    #[test]
    fn test_parse_name_pair_without_newline() {
        let pair = parse_name_pair(b"MT\tchrM").unwrap();
        assert_eq!(pair.local, b"MT");
        assert_eq!(pair.combined, b"chrM");
    }

    #[test]
    fn test_parse_name_pair_crlf() {
        let pair = parse_name_pair(b"MT\tchrM\r\n").unwrap();
        assert_eq!(pair.combined, b"chrM");
    }

    #[test]
    fn test_parse_name_pair_no_tab() {
        assert!(parse_name_pair(b"chr1 chr1\n").is_none());
        assert!(parse_name_pair(b"").is_none());
    }

    #[test]
    fn test_for_each_line_respects_limit() {
        let mut seen = Vec::new();
        let count = for_each_line(Cursor::new("a\nb\nc\n"), 2, |n, line| {
            seen.push((n, line.to_vec()));
            Ok::<(), io::Error>(())
        })
        .unwrap();
        assert_eq!(count, 2);
        assert_eq!(seen, vec![(1, b"a\n".to_vec()), (2, b"b\n".to_vec())]);
    }

    #[test]
    fn test_for_each_line_stops_at_eof() {
        let count = for_each_line(Cursor::new("a\n"), 5, |_, _| Ok::<(), io::Error>(())).unwrap();
        assert_eq!(count, 1);
    }
}
