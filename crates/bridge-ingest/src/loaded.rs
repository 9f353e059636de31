//! Loader output carrying data together with recovered issues.

use bridge_model::SourceIssue;
use tracing::warn;

/// Data read from a source plus the non-fatal issues met on the way.
#[derive(Debug, Clone, Default)]
pub struct Loaded<T> {
    pub data: T,
    pub issues: Vec<SourceIssue>,
}

impl<T> Loaded<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            issues: Vec::new(),
        }
    }

    /// Record an issue and log it at `warn`.
    pub fn push_issue(&mut self, issue: SourceIssue) {
        warn!(
            kind = %issue.kind,
            source = %issue.source,
            path = ?issue.path,
            "{}",
            issue.detail
        );
        self.issues.push(issue);
    }

    pub fn with_issue(mut self, issue: SourceIssue) -> Self {
        self.push_issue(issue);
        self
    }
}
