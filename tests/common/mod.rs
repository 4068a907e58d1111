//! Fixtures shared by the command-line tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn cmd() -> Command {
    Command::cargo_bin("bam-untangle").unwrap()
}

/// A SAM header with one `@SQ` line per name
pub fn header(names: &[&str]) -> String {
    let mut text = String::from("@HD\tVN:1.6\tSO:unsorted\n");
    for name in names {
        text.push_str(&format!("@SQ\tSN:{name}\tLN:1000\n"));
    }
    text
}

/// A mapped SAM record line (`rnext` may be `=` or `*`)
pub fn sam_record(name: &str, rname: &str, rnext: &str) -> String {
    let pnext = if rnext == "*" { 0 } else { 200 };
    format!("{name}\t0\t{rname}\t100\t60\t4M\t{rnext}\t{pnext}\t0\tACGT\tIIII\n")
}

/// A fully unmapped SAM record line
pub fn unmapped_record(name: &str) -> String {
    format!("{name}\t4\t*\t0\t0\t*\t*\t0\t0\tACGT\tIIII\n")
}

pub fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Read names of the records in a SAM output, in file order
pub fn sam_names(path: &Path) -> Vec<String> {
    sam_records(path)
        .iter()
        .map(|fields| fields[0].clone())
        .collect()
}

/// Tab-split record lines of a SAM output
pub fn sam_records(path: &Path) -> Vec<Vec<String>> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.starts_with('@'))
        .map(|l| l.split('\t').map(str::to_string).collect())
        .collect()
}

/// `names:header:third` origin argument
pub fn origin(names: &Path, header: &Path, third: &Path) -> String {
    format!("{}:{}:{}", names.display(), header.display(), third.display())
}
