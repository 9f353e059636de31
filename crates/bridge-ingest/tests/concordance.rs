//! Crosswalk loader tests over on-disk fixtures.

use std::fs;
use std::path::Path;

use bridge_ingest::{PREFERRED_FILES, load_concordance, read_crosswalk};
use bridge_model::{IssueKind, YearRange};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn melts_wide_export_below_title_rows() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "PUFComparability_2024.csv",
        "Comparability of public use files,,,\n\
         ,,,\n\
         Variable,Description,PUF02,2003\n\
         mrjflag,Marijuana ever used,1,1\n\
         ALCFLAG,Alcohol ever used,,2\n\
         ,orphan row,9,9\n",
    );
    let loaded = load_concordance(dir.path(), &YearRange::default());
    assert!(loaded.issues.is_empty());

    let entries: Vec<(i32, &str, &str)> = loaded
        .data
        .iter()
        .map(|e| (e.year, e.variable_name.as_str(), e.confirmed_group.as_str()))
        .collect();
    assert_eq!(
        entries,
        vec![(2002, "MRJFLAG", "1"), (2003, "MRJFLAG", "1"), (2003, "ALCFLAG", "2")]
    );
    assert!(
        loaded
            .data
            .iter()
            .all(|e| e.concordance_file == "PUFComparability_2024.csv")
    );
}

#[test]
fn retries_fallback_header_row() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("crosswalk.csv");
    fs::write(
        &path,
        "VARIABLE,NOTES\n\
         legend,see below\n\
         ,\n\
         VARIABLE,PUF02,PUF03\n\
         CIGFLAG,C1,C1\n",
    )
    .unwrap();
    let entries = read_crosswalk(&path, &YearRange::default()).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].year, 2002);
    assert_eq!(entries[1].year, 2003);
}

#[test]
fn preferred_files_shadow_other_exports() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), PREFERRED_FILES[1], "VARIABLE,2019\nA,1\n");
    write(dir.path(), PREFERRED_FILES[0], "VARIABLE,2019\nA,2\n");
    write(dir.path(), "scratch.csv", "VARIABLE,2019\nB,3\n");

    let loaded = load_concordance(dir.path(), &YearRange::default());
    let files: Vec<&str> = loaded
        .data
        .iter()
        .map(|e| e.concordance_file.as_str())
        .collect();
    assert_eq!(files, vec![PREFERRED_FILES[0], PREFERRED_FILES[1]]);
}

#[test]
fn unrecognized_export_is_skipped() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.csv", "NAME,2002\nA,1\n");
    write(dir.path(), "b.csv", "VARIABLE,NOTES\nA,none\n");
    write(dir.path(), "c.csv", "VARIABLE,2002\nC,7\n");

    let loaded = load_concordance(dir.path(), &YearRange::default());
    assert_eq!(loaded.data.len(), 1);
    assert_eq!(loaded.data[0].variable_name, "C");
    assert_eq!(loaded.issues.len(), 2);
    assert!(
        loaded
            .issues
            .iter()
            .all(|issue| issue.kind == IssueKind::MalformedRecord)
    );
    let skipped: Vec<_> = loaded
        .issues
        .iter()
        .filter_map(|issue| issue.path.clone())
        .collect();
    assert_eq!(skipped, vec![dir.path().join("a.csv"), dir.path().join("b.csv")]);
}

#[test]
fn missing_directory_degrades() {
    let dir = TempDir::new().unwrap();
    let loaded = load_concordance(&dir.path().join("concordance"), &YearRange::default());
    assert!(loaded.data.is_empty());
    assert_eq!(loaded.issues.len(), 1);
    assert_eq!(loaded.issues[0].kind, IssueKind::SourceDegraded);

    let empty = load_concordance(dir.path(), &YearRange::default());
    assert_eq!(empty.issues[0].kind, IssueKind::SourceDegraded);
}
