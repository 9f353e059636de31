//! Error types for source ingestion.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading a source.
///
/// Only [`IngestError::SourceUnavailable`] ever escapes a loader. The other
/// variants describe a single file or row and are downgraded to
/// [`bridge_model::SourceIssue`] values by the loaders.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The required base metadata source cannot be used at all.
    #[error("base metadata unavailable at {path}: {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },

    // === File System Errors ===
    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// Failed to parse a CSV export.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to parse the question-text JSON.
    #[error("failed to parse JSON {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    // === Layout Errors ===
    /// Required column not found.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// Crosswalk export without any recognizable year column.
    #[error("no year columns found in {path} (header row {header_row})")]
    NoYearColumns { path: PathBuf, header_row: usize },
}

impl IngestError {
    /// Path of the file or directory the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::SourceUnavailable { path, .. }
            | Self::DirectoryRead { path, .. }
            | Self::FileRead { path, .. }
            | Self::CsvParse { path, .. }
            | Self::JsonParse { path, .. }
            | Self::EmptyCsv { path }
            | Self::MissingColumn { path, .. }
            | Self::NoYearColumns { path, .. } => path.as_path(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::MissingColumn {
            column: "VARIABLE".to_string(),
            path: PathBuf::from("/crosswalk/PUFComparability_2024.csv"),
        };
        assert_eq!(
            err.to_string(),
            "required column 'VARIABLE' not found in /crosswalk/PUFComparability_2024.csv"
        );
        assert_eq!(err.path(), Path::new("/crosswalk/PUFComparability_2024.csv"));
    }

    #[test]
    fn test_unavailable_display() {
        let err = IngestError::SourceUnavailable {
            path: PathBuf::from("metadata"),
            reason: "path does not exist".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "base metadata unavailable at metadata: path does not exist"
        );
    }
}
