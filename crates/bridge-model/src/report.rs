//! Summary of a harmonization run.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::issue::{IssueKind, SourceIssue, SourceKind};
use crate::options::BridgeOptions;

/// Per-kind issue totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCounts {
    pub degraded_sources: usize,
    pub malformed_records: usize,
}

impl IssueCounts {
    pub fn from_issues(issues: &[SourceIssue]) -> Self {
        let mut counts = Self::default();
        for issue in issues {
            match issue.kind {
                IssueKind::SourceDegraded => counts.degraded_sources += 1,
                IssueKind::MalformedRecord => counts.malformed_records += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.degraded_sources + self.malformed_records
    }
}

/// SHA-256 fingerprint of one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDigest {
    pub source: SourceKind,
    pub path: PathBuf,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub classifier_version: String,
    pub generated_at: DateTime<Utc>,
    pub options: BridgeOptions,
    pub total_records: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub unique_variables: usize,
    pub with_question_text: usize,
    pub with_confirmed: usize,
    pub confirmed_groups: usize,
    pub narrow_bridges: usize,
    /// Heuristic keys rewritten to a confirmed id by expansion.
    pub expanded_keys: usize,
    /// Concordance entries dropped because another entry already claimed
    /// the same `(year, variable_name)`.
    pub concordance_conflicts: usize,
    pub issue_counts: IssueCounts,
    pub issues: Vec<SourceIssue>,
    pub sources: Vec<SourceDigest>,
}

impl RunReport {
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_issue_kinds() {
        let issues = vec![
            SourceIssue::degraded(SourceKind::QuestionText, "missing"),
            SourceIssue::malformed(SourceKind::Metadata, "bad year"),
            SourceIssue::malformed(SourceKind::Concordance, "no VARIABLE column"),
        ];
        let counts = IssueCounts::from_issues(&issues);
        assert_eq!(counts.degraded_sources, 1);
        assert_eq!(counts.malformed_records, 2);
        assert_eq!(counts.total(), 3);
    }
}
