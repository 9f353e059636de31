//! Non-fatal source problems recorded during a run.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Recoverable failure classes.
///
/// A missing base metadata source is fatal and never becomes an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// An optional source is missing or unreadable; its columns stay empty.
    SourceDegraded,
    /// A single row or file failed structural parsing and was skipped.
    MalformedRecord,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::SourceDegraded => "source_degraded",
            IssueKind::MalformedRecord => "malformed_record",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The input source an issue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Metadata,
    QuestionText,
    Concordance,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Metadata => "metadata",
            SourceKind::QuestionText => "question_text",
            SourceKind::Concordance => "concordance",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceIssue {
    pub kind: IssueKind,
    pub source: SourceKind,
    pub path: Option<PathBuf>,
    pub detail: String,
}

impl SourceIssue {
    pub fn degraded(source: SourceKind, detail: impl Into<String>) -> Self {
        Self {
            kind: IssueKind::SourceDegraded,
            source,
            path: None,
            detail: detail.into(),
        }
    }

    pub fn malformed(source: SourceKind, detail: impl Into<String>) -> Self {
        Self {
            kind: IssueKind::MalformedRecord,
            source,
            path: None,
            detail: detail.into(),
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl fmt::Display for SourceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(
                f,
                "[{}] {} ({}): {}",
                self.kind,
                self.source,
                path.display(),
                self.detail
            ),
            None => write!(f, "[{}] {}: {}", self.kind, self.source, self.detail),
        }
    }
}
