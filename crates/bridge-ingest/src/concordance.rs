//! Agency crosswalk loader.
//!
//! Crosswalk exports are wide: one row per variable, one column per survey
//! year, and each cell holds the comparability group of that variable in
//! that year. The header row sits below a variable number of title rows,
//! so it is detected from content rather than assumed.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use bridge_model::{ConcordanceEntry, SourceIssue, SourceKind, YearRange};
use csv::{ReaderBuilder, StringRecord};
use regex::Regex;
use tracing::{debug, info};

use crate::discovery::{file_name, list_csv_files};
use crate::error::{IngestError, Result};
use crate::loaded::Loaded;

/// Crosswalk exports used when present, in load order.
pub const PREFERRED_FILES: [&str; 2] = [
    "ConcatPUFComparability_2019.csv",
    "PUFComparability_2024.csv",
];

/// Rows scanned when looking for the header.
pub const HEADER_SCAN_ROWS: usize = 12;

/// Header row tried when the detected one has no year columns.
pub const FALLBACK_HEADER_ROW: usize = 3;

const VARIABLE_COLUMN: &str = "VARIABLE";

static PUF_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)PUF\s*(\d{2})").expect("valid PUF year regex"));

/// Pick the crosswalk files to load from `dir`.
pub fn concordance_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let preferred: Vec<PathBuf> = PREFERRED_FILES
        .iter()
        .map(|name| dir.join(name))
        .filter(|path| path.is_file())
        .collect();
    if !preferred.is_empty() {
        return Ok(preferred);
    }
    list_csv_files(dir)
}

fn normalized(cell: &str) -> String {
    cell.trim_start_matches('\u{feff}').trim().to_uppercase()
}

/// Index of the header row among the leading rows of an export.
///
/// First row with a `VARIABLE` cell, else the first row with a cell
/// starting with `PUF`, else row 0.
pub fn detect_header_row(rows: &[StringRecord]) -> usize {
    let scanned = &rows[..rows.len().min(HEADER_SCAN_ROWS)];
    first_row_with(scanned, |cell| cell == VARIABLE_COLUMN)
        .or_else(|| first_row_with(scanned, |cell| cell.starts_with("PUF")))
        .unwrap_or(0)
}

fn first_row_with(rows: &[StringRecord], predicate: impl Fn(&str) -> bool) -> Option<usize> {
    rows.iter()
        .position(|row| row.iter().any(|cell| predicate(&normalized(cell))))
}

/// Year encoded by a crosswalk column header, if any.
///
/// Plain four-digit years and `PUFnn` labels (year `2000 + nn`) are
/// recognized; years outside `years` are ignored.
pub fn header_year(header: &str, years: &YearRange) -> Option<i32> {
    let header = header.trim();
    let year = if !header.is_empty() && header.bytes().all(|b| b.is_ascii_digit()) {
        header.parse::<i32>().ok()?
    } else {
        let captures = PUF_YEAR.captures(header)?;
        2000 + captures[1].parse::<i32>().ok()?
    };
    years.contains(year).then_some(year)
}

/// `(column index, year)` for every year column of a header row.
pub fn year_columns(header: &StringRecord, years: &YearRange) -> Vec<(usize, i32)> {
    header
        .iter()
        .enumerate()
        .filter_map(|(index, cell)| header_year(cell, years).map(|year| (index, year)))
        .collect()
}

/// Melt one wide export into long crosswalk entries.
pub fn read_crosswalk(path: &Path, years: &YearRange) -> Result<Vec<ConcordanceEntry>> {
    let csv_error = |source: csv::Error| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    };
    let rows = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?
        .records()
        .collect::<std::result::Result<Vec<StringRecord>, _>>()
        .map_err(csv_error)?;
    if rows.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let mut header_row = detect_header_row(&rows);
    let mut columns = year_columns(&rows[header_row], years);
    if columns.is_empty() && header_row != FALLBACK_HEADER_ROW && rows.len() > FALLBACK_HEADER_ROW
    {
        debug!(path = %path.display(), header_row, "retrying with fallback header row");
        header_row = FALLBACK_HEADER_ROW;
        columns = year_columns(&rows[header_row], years);
    }

    let header = &rows[header_row];
    let variable_column = header
        .iter()
        .position(|cell| normalized(cell) == VARIABLE_COLUMN)
        .ok_or_else(|| IngestError::MissingColumn {
            column: VARIABLE_COLUMN.to_string(),
            path: path.to_path_buf(),
        })?;
    if columns.is_empty() {
        return Err(IngestError::NoYearColumns {
            path: path.to_path_buf(),
            header_row,
        });
    }

    let concordance_file = file_name(path);
    let body = &rows[header_row + 1..];
    let mut entries = Vec::new();
    for (column, year) in columns {
        for row in body {
            let variable = row.get(variable_column).unwrap_or("").trim();
            let group = row.get(column).unwrap_or("").trim();
            if variable.is_empty() || group.is_empty() {
                continue;
            }
            entries.push(ConcordanceEntry {
                year,
                variable_name: variable.to_uppercase(),
                confirmed_group: group.to_string(),
                concordance_file: concordance_file.clone(),
            });
        }
    }
    Ok(entries)
}

/// Load every crosswalk export under `path` (a directory or a single file).
///
/// Never fails: a missing source degrades to no entries and an unreadable
/// or unrecognized export is skipped.
pub fn load_concordance(path: &Path, years: &YearRange) -> Loaded<Vec<ConcordanceEntry>> {
    let degraded = |detail: String| {
        Loaded::new(Vec::new())
            .with_issue(SourceIssue::degraded(SourceKind::Concordance, detail).with_path(path))
    };

    let files = if path.is_dir() {
        match concordance_files(path) {
            Ok(files) => files,
            Err(err) => return degraded(err.to_string()),
        }
    } else if path.is_file() {
        vec![path.to_path_buf()]
    } else {
        return degraded("concordance directory not found".to_string());
    };
    if files.is_empty() {
        return degraded("no concordance files found".to_string());
    }

    let mut loaded = Loaded::new(Vec::new());
    for file in &files {
        match read_crosswalk(file, years) {
            Ok(entries) => {
                info!(file = %file_name(file), entries = entries.len(), "concordance file loaded");
                loaded.data.extend(entries);
            }
            Err(err) => {
                loaded.push_issue(
                    SourceIssue::malformed(SourceKind::Concordance, err.to_string())
                        .with_path(err.path()),
                );
            }
        }
    }
    info!(
        files = files.len(),
        entries = loaded.data.len(),
        "concordance loaded"
    );
    loaded
}
