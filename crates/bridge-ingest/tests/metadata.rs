//! Base metadata loader tests over directories of yearly exports.

use std::fs;

use bridge_ingest::{IngestError, load_metadata};
use bridge_model::{IssueKind, SourceKind, YearRange};
use tempfile::TempDir;

#[test]
fn loads_directory_in_file_name_order() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("nsduh_2003.csv"),
        "year,variable_name,variable_label\n2003,MRJFLAG,MARIJUANA - EVER USED\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("nsduh_2002.csv"),
        "year,variable_name,variable_label\n2002,MRJFLAG,MARIJUANA - EVER USED\n2003,MRJFLAG,early copy\n",
    )
    .unwrap();
    fs::write(dir.path().join("readme.csv"), "title\nnot a metadata export\n").unwrap();

    let loaded = load_metadata(dir.path(), &YearRange::default()).unwrap();
    let rows: Vec<(i32, Option<&str>)> = loaded
        .data
        .iter()
        .map(|row| (row.year, row.variable_label.as_deref()))
        .collect();
    assert_eq!(
        rows,
        vec![(2002, Some("MARIJUANA - EVER USED")), (2003, Some("early copy"))]
    );

    assert_eq!(loaded.issues.len(), 2);
    assert!(loaded.issues.iter().all(|issue| {
        issue.kind == IssueKind::MalformedRecord && issue.source == SourceKind::Metadata
    }));
    assert!(
        loaded
            .issues
            .iter()
            .any(|issue| issue.detail.contains("required column 'year'"))
    );
}

#[test]
fn narrower_year_range_rejects_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vars.csv");
    fs::write(&path, "year,variable_name\n2001,A\n2002,A\n").unwrap();
    let years = YearRange::new(2002, 2024).unwrap();
    let loaded = load_metadata(&path, &years).unwrap();
    assert_eq!(loaded.data.len(), 1);
    assert_eq!(loaded.issues.len(), 1);
}

#[test]
fn empty_directory_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let err = load_metadata(dir.path(), &YearRange::default()).unwrap_err();
    assert!(matches!(err, IngestError::SourceUnavailable { .. }));
    assert!(err.to_string().contains("no CSV files found"));
}
