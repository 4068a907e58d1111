//! End-to-end tests of the `remap` command

mod common;

use common::{cmd, header, origin, sam_records, sam_record, unmapped_record, write};
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Origin A aligned to `1, 2`, origin B to `bchr`, combined header `chrX, chr2, chr1`.
///
/// The merged stream carries each origin's local indices under A's header:
/// `r1` (A, 1/=), `r2` (B, local 0), `r3` (A, 2/*) and an unclaimed `x` on `2`.
struct Remap {
    dir: TempDir,
    a: String,
    b: String,
}

impl Remap {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let merged_header = header(&["1", "2"]);
        write(
            &dir,
            "merged.sam",
            &format!(
                "{merged_header}{}{}{}{}",
                sam_record("r1", "1", "="),
                sam_record("r2", "1", "*"),
                sam_record("r3", "2", "*"),
                sam_record("x", "2", "*"),
            ),
        );
        write(&dir, "combined.sam", &header(&["chrX", "chr2", "chr1"]));
        write(&dir, "a_header.sam", &merged_header);
        write(&dir, "b_header.sam", &header(&["bchr"]));
        write(&dir, "a_names.txt", "r1\nr3\n");
        write(&dir, "b_names.txt", "r2\n");
        write(&dir, "a.tsv", "1\tchr1\n2\tchr2\n");
        write(&dir, "b.tsv", "bchr\tchr2\n");

        let a = origin(
            &dir.path().join("a_names.txt"),
            &dir.path().join("a_header.sam"),
            &dir.path().join("a.tsv"),
        );
        let b = origin(
            &dir.path().join("b_names.txt"),
            &dir.path().join("b_header.sam"),
            &dir.path().join("b.tsv"),
        );
        Self { dir, a, b }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn command(&self) -> assert_cmd::Command {
        let mut c = cmd();
        c.arg("remap")
            .arg(self.path("combined.sam"))
            .arg(self.path("merged.sam"))
            .arg(&self.a)
            .arg(&self.b)
            .arg(self.path("out.sam"));
        c
    }
}

/// (name, RNAME, RNEXT) of each output record, with `=` spelled out
fn placements(records: &[Vec<String>]) -> Vec<(String, String, String)> {
    records
        .iter()
        .map(|f| {
            let rnext = if f[6] == "=" { f[2].clone() } else { f[6].clone() };
            (f[0].clone(), f[2].clone(), rnext)
        })
        .collect()
}

fn triple(name: &str, rname: &str, rnext: &str) -> (String, String, String) {
    (name.to_string(), rname.to_string(), rnext.to_string())
}

#[test]
fn test_remap_translates_each_origin() {
    let t = Remap::new();

    t.command()
        .assert()
        .success()
        .stdout(predicate::str::contains("Records unaccounted: 1"));

    let out = std::fs::read_to_string(t.path("out.sam")).unwrap();
    assert!(out.contains("@SQ\tSN:chrX"));

    assert_eq!(
        placements(&sam_records(&t.path("out.sam"))),
        vec![
            triple("r1", "chr1", "chr1"),
            triple("r2", "chr2", "*"),
            triple("r3", "chr2", "*"),
            // unclaimed index 1 is kept and now names chr2 in the combined header
            triple("x", "chr2", "*"),
        ]
    );
}

#[test]
fn test_remap_keeps_every_other_field() {
    let t = Remap::new();
    t.command().assert().success();

    for fields in sam_records(&t.path("out.sam")) {
        assert_eq!(fields[3], "100");
        assert_eq!(fields[5], "4M");
        assert_eq!(fields[9], "ACGT");
        assert_eq!(fields[10], "IIII");
    }
}

#[test]
fn test_remap_with_empty_name_lists_copies_records() {
    let t = Remap::new();
    write(&t.dir, "a_names.txt", "");
    write(&t.dir, "b_names.txt", "");

    t.command()
        .assert()
        .success()
        .stdout(predicate::str::contains("Records unaccounted: 4"));

    let names: Vec<String> = sam_records(&t.path("out.sam"))
        .into_iter()
        .map(|f| f[0].clone())
        .collect();
    assert_eq!(names, vec!["r1", "r2", "r3", "x"]);
}

#[test]
fn test_remap_unmapped_record_stays_unmapped() {
    let t = Remap::new();
    let merged = format!("{}{}", header(&["1", "2"]), unmapped_record("r1"));
    write(&t.dir, "merged.sam", &merged);
    write(&t.dir, "a_names.txt", "r1\n");

    t.command().assert().success();

    assert_eq!(
        placements(&sam_records(&t.path("out.sam"))),
        vec![triple("r1", "*", "*")]
    );
}

#[test]
fn test_remap_incomplete_translation_fails() {
    let t = Remap::new();
    write(&t.dir, "a.tsv", "1\tchr1\n");

    t.command()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incomplete translation table"))
        .stderr(predicate::str::contains("a.tsv"));

    assert!(!t.path("out.sam").exists());
}

#[test]
fn test_remap_allow_incomplete_translation() {
    let t = Remap::new();
    write(&t.dir, "a.tsv", "1\tchr1\n");

    t.command()
        .arg("--allow-incomplete-translation")
        .assert()
        .success()
        .stdout(predicate::str::contains("left untranslated: 1"));

    // r3 sits on A's untranslated second reference and keeps index 1
    let records = placements(&sam_records(&t.path("out.sam")));
    assert_eq!(records[2], triple("r3", "chr2", "*"));
    assert_eq!(records[0], triple("r1", "chr1", "chr1"));
}

#[test]
fn test_remap_unknown_combined_name_fails() {
    let t = Remap::new();
    write(&t.dir, "b.tsv", "bchr\tchrY\n");

    t.command()
        .assert()
        .failure()
        .stderr(predicate::str::contains("chrY"));
}

#[test]
fn test_remap_json_summary() {
    let t = Remap::new();
    let output = t.command().arg("--format").arg("json").output().unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["command"], "remap");
    assert_eq!(summary["records_claimed"], 3);
    assert_eq!(summary["references_untranslated"], 0);
}

#[test]
fn test_remap_missing_output_argument() {
    let t = Remap::new();

    cmd()
        .arg("remap")
        .arg(t.path("combined.sam"))
        .arg(t.path("merged.sam"))
        .arg(&t.a)
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_remap_corrupt_merged_record() {
    let t = Remap::new();
    write(
        &t.dir,
        "merged.sam",
        &format!(
            "{}{}r2\t0\t1\tnot-a-position\t60\t4M\t*\t0\t0\tACGT\tIIII\n",
            header(&["1", "2"]),
            sam_record("r1", "1", "="),
        ),
    );

    t.command()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to remap"))
        .stderr(predicate::str::contains("merged.sam"));

    let names: Vec<String> = sam_records(&t.path("out.sam"))
        .into_iter()
        .map(|f| f[0].clone())
        .collect();
    assert_eq!(names, vec!["r1"]);
}
