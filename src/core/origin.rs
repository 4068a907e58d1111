use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Stable identifier of an origin: its zero-based position on the command line.
///
/// The position is also the origin's matching priority. When two origins expect
/// the same read name at the same time, the lower `OriginId` claims the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct OriginId(pub usize);

impl OriginId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for OriginId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "origin #{}", self.0 + 1)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OriginSpecError {
    #[error("expected three colon-separated paths, found {found} in '{spec}'")]
    WrongFieldCount { spec: String, found: usize },

    #[error("empty {field} path in '{spec}'")]
    EmptyField { spec: String, field: &'static str },
}

/// Split `a:b:c` on the first two colons. The last field keeps any further colons.
fn split_triple<'a>(
    spec: &'a str,
    fields: [&'static str; 3],
) -> Result<[&'a str; 3], OriginSpecError> {
    let parts: Vec<&str> = spec.splitn(3, ':').collect();
    let [first, second, third] = parts[..] else {
        return Err(OriginSpecError::WrongFieldCount {
            spec: spec.to_string(),
            found: parts.len(),
        });
    };

    for (value, field) in [first, second, third].into_iter().zip(fields) {
        if value.is_empty() {
            return Err(OriginSpecError::EmptyField {
                spec: spec.to_string(),
                field,
            });
        }
    }

    Ok([first, second, third])
}

/// An origin for the split command: `<read_names>:<header>:<output>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOriginSpec {
    /// Read names expected from this origin, one per line
    pub read_names: PathBuf,
    /// Header template written to this origin's output
    pub header: PathBuf,
    /// Output BAM (or SAM) receiving the origin's records
    pub output: PathBuf,
}

impl FromStr for SplitOriginSpec {
    type Err = OriginSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [read_names, header, output] = split_triple(s, ["read names", "header", "output"])?;
        Ok(Self {
            read_names: PathBuf::from(read_names),
            header: PathBuf::from(header),
            output: PathBuf::from(output),
        })
    }
}

/// An origin for the remap command: `<read_names>:<header>:<translation>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapOriginSpec {
    /// Read names expected from this origin, one per line
    pub read_names: PathBuf,
    /// Header the origin's records were aligned against
    pub header: PathBuf,
    /// Tab-separated `local_name<TAB>combined_name` pairs
    pub translation: PathBuf,
}

impl FromStr for RemapOriginSpec {
    type Err = OriginSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [read_names, header, translation] =
            split_triple(s, ["read names", "header", "translation"])?;
        Ok(Self {
            read_names: PathBuf::from(read_names),
            header: PathBuf::from(header),
            translation: PathBuf::from(translation),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_split_origin() {
        let spec: SplitOriginSpec = "a.txt:a.sam:a.bam".parse().unwrap();
        assert_eq!(spec.read_names, PathBuf::from("a.txt"));
        assert_eq!(spec.header, PathBuf::from("a.sam"));
        assert_eq!(spec.output, PathBuf::from("a.bam"));
    }

    #[test]
    fn test_parse_remap_origin() {
        let spec: RemapOriginSpec = "names.txt:hdr.sam:map.tsv".parse().unwrap();
        assert_eq!(spec.translation, PathBuf::from("map.tsv"));
    }

    #[test]
    fn test_last_field_keeps_colons() {
        let spec: SplitOriginSpec = "a.txt:a.sam:out:weird.bam".parse().unwrap();
        assert_eq!(spec.output, PathBuf::from("out:weird.bam"));
    }

    #[test]
    fn test_too_few_fields() {
        let err = "a.txt:a.sam".parse::<SplitOriginSpec>().unwrap_err();
        assert_eq!(
            err,
            OriginSpecError::WrongFieldCount {
                spec: "a.txt:a.sam".to_string(),
                found: 2
            }
        );
    }

    #[test]
    fn test_empty_field() {
        let err = "a.txt::map.tsv".parse::<RemapOriginSpec>().unwrap_err();
        assert!(matches!(
            err,
            OriginSpecError::EmptyField {
                field: "header",
                ..
            }
        ));
    }

    #[test]
    fn test_origin_id_display() {
        assert_eq!(OriginId(0).to_string(), "origin #1");
        assert_eq!(OriginId(2).index(), 2);
    }
}
