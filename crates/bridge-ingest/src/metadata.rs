//! Base variable metadata loader.
//!
//! Reads the per-year variable exports (one row per variable-year with
//! `year`, `variable_name`, `variable_label`, `value_labels`). This is the
//! only required source: if nothing usable can be read the run is aborted.

use std::collections::HashSet;
use std::path::Path;

use bridge_model::{MetadataRow, SourceIssue, SourceKind, YearRange};
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::discovery::list_csv_files;
use crate::error::{IngestError, Result};
use crate::loaded::Loaded;

/// Column positions of the metadata fields in one export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MetadataColumns {
    year: usize,
    variable_name: usize,
    variable_label: Option<usize>,
    value_labels: Option<usize>,
}

impl MetadataColumns {
    fn locate(headers: &StringRecord, path: &Path) -> Result<Self> {
        let required = |column: &str| {
            column_index(headers, column).ok_or_else(|| IngestError::MissingColumn {
                column: column.to_string(),
                path: path.to_path_buf(),
            })
        };
        Ok(Self {
            year: required("year")?,
            variable_name: required("variable_name")?,
            variable_label: column_index(headers, "variable_label"),
            value_labels: column_index(headers, "value_labels"),
        })
    }
}

/// Case-insensitive header lookup that tolerates a UTF-8 BOM.
fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|header| {
        header
            .trim_start_matches('\u{feff}')
            .trim()
            .eq_ignore_ascii_case(name)
    })
}

fn field<'a>(record: &'a StringRecord, index: Option<usize>) -> &'a str {
    index.and_then(|i| record.get(i)).unwrap_or("").trim()
}

/// Parse one data row. Returns the problem description on failure.
fn parse_row(
    record: &StringRecord,
    columns: &MetadataColumns,
    years: &YearRange,
) -> std::result::Result<MetadataRow, String> {
    let raw_year = field(record, Some(columns.year));
    let year: i32 = raw_year
        .parse()
        .map_err(|_| format!("invalid year '{raw_year}'"))?;
    if !years.contains(year) {
        return Err(format!("year {year} outside {years}"));
    }

    let variable_name = field(record, Some(columns.variable_name)).to_uppercase();
    if variable_name.is_empty() {
        return Err("empty variable_name".to_string());
    }

    let label = field(record, columns.variable_label);
    let mut row = MetadataRow::new(year, variable_name, (!label.is_empty()).then_some(label));
    row.value_labels = field(record, columns.value_labels).to_string();
    Ok(row)
}

/// Read one export, appending rows and row-level issues to `loaded`.
fn read_metadata_file(
    path: &Path,
    years: &YearRange,
    seen: &mut HashSet<(i32, String)>,
    loaded: &mut Loaded<Vec<MetadataRow>>,
) -> Result<usize> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
    let headers = reader
        .headers()
        .map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    if headers.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    let columns = MetadataColumns::locate(&headers, path)?;

    let mut added = 0usize;
    for (index, record) in reader.records().enumerate() {
        // 1-based, counting the header line.
        let line = index + 2;
        let parsed = record
            .map_err(|e| e.to_string())
            .and_then(|record| parse_row(&record, &columns, years));
        let row = match parsed {
            Ok(row) => row,
            Err(detail) => {
                loaded.push_issue(
                    SourceIssue::malformed(SourceKind::Metadata, format!("line {line}: {detail}"))
                        .with_path(path),
                );
                continue;
            }
        };
        if !seen.insert((row.year, row.variable_name.clone())) {
            loaded.push_issue(
                SourceIssue::malformed(
                    SourceKind::Metadata,
                    format!(
                        "line {line}: duplicate {} for {}",
                        row.variable_name, row.year
                    ),
                )
                .with_path(path),
            );
            continue;
        }
        loaded.data.push(row);
        added += 1;
    }
    Ok(added)
}

/// Load base metadata from a CSV file or a directory of CSV files.
///
/// Row and file problems become `MalformedRecord` issues. The call fails
/// with [`IngestError::SourceUnavailable`] when the path is missing or no
/// file has a usable header.
pub fn load_metadata(path: &Path, years: &YearRange) -> Result<Loaded<Vec<MetadataRow>>> {
    let unavailable = |reason: String| IngestError::SourceUnavailable {
        path: path.to_path_buf(),
        reason,
    };
    if !path.exists() {
        return Err(unavailable("path does not exist".to_string()));
    }

    let files = if path.is_dir() {
        list_csv_files(path).map_err(|e| unavailable(e.to_string()))?
    } else {
        vec![path.to_path_buf()]
    };
    if files.is_empty() {
        return Err(unavailable("no CSV files found".to_string()));
    }

    let mut loaded = Loaded::new(Vec::new());
    let mut seen = HashSet::new();
    let mut usable_files = 0usize;
    for file in &files {
        match read_metadata_file(file, years, &mut seen, &mut loaded) {
            Ok(rows) => {
                debug!(path = %file.display(), rows, "metadata file loaded");
                usable_files += 1;
            }
            Err(err) => {
                loaded.push_issue(
                    SourceIssue::malformed(SourceKind::Metadata, err.to_string())
                        .with_path(err.path()),
                );
            }
        }
    }

    if usable_files == 0 {
        return Err(unavailable(format!(
            "none of {} file(s) has a usable header",
            files.len()
        )));
    }

    info!(
        path = %path.display(),
        files = usable_files,
        rows = loaded.data.len(),
        issues = loaded.issues.len(),
        "base metadata loaded"
    );
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_model::IssueKind;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_loads_single_file() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "vars.csv",
            "\u{feff}Year,Variable_Name,Variable_Label,Value_Labels\n\
             2002,mrjflag,MARIJUANA - EVER USED,0=Never; 1=Ever\n\
             2002,questid,,\n",
        );
        let loaded = load_metadata(&path, &YearRange::default()).unwrap();
        assert!(loaded.issues.is_empty());
        assert_eq!(loaded.data.len(), 2);
        assert_eq!(loaded.data[0].variable_name, "MRJFLAG");
        assert_eq!(loaded.data[0].value_labels, "0=Never; 1=Ever");
        assert_eq!(loaded.data[1].variable_label, None);
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "vars.csv",
            "year,variable_name,variable_label\n\
             20O2,MRJFLAG,typo year\n\
             1975,MRJFLAG,too early\n\
             2003, ,no name\n\
             2003,MRJFLAG,kept\n\
             2003,mrjflag,duplicate\n",
        );
        let loaded = load_metadata(&path, &YearRange::default()).unwrap();
        assert_eq!(loaded.data.len(), 1);
        assert_eq!(loaded.data[0].variable_label.as_deref(), Some("kept"));
        assert_eq!(loaded.issues.len(), 4);
        assert!(
            loaded
                .issues
                .iter()
                .all(|issue| issue.kind == IssueKind::MalformedRecord)
        );
        assert!(loaded.issues[3].detail.contains("duplicate"));
    }

    #[test]
    fn test_missing_path_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let result = load_metadata(&dir.path().join("nope"), &YearRange::default());
        assert!(matches!(result, Err(IngestError::SourceUnavailable { .. })));
    }

    #[test]
    fn test_no_usable_header_is_unavailable() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.csv", "name,label\nMRJFLAG,x\n");
        write(&dir, "b.csv", "");
        let result = load_metadata(dir.path(), &YearRange::default());
        assert!(matches!(result, Err(IngestError::SourceUnavailable { .. })));
    }
}
