//! Run report assembly.

use std::collections::HashSet;

use bridge_model::{BridgeOptions, IssueCounts, RunReport, SourceDigest, SourceIssue};
use chrono::Utc;

use crate::classify::CLASSIFIER_VERSION;
use crate::pipeline::Harmonized;

/// Summarize a finished run together with the issues the loaders collected.
pub fn build_report(
    harmonized: &Harmonized,
    options: &BridgeOptions,
    issues: Vec<SourceIssue>,
    sources: Vec<SourceDigest>,
) -> RunReport {
    let records = &harmonized.records;
    let unique_variables = records
        .iter()
        .map(|record| record.variable_name.as_str())
        .collect::<HashSet<_>>()
        .len();
    let confirmed_groups = records
        .iter()
        .filter(|record| !record.cross_year_confirmed.is_empty())
        .map(|record| record.cross_year_confirmed.as_str())
        .collect::<HashSet<_>>()
        .len();

    RunReport {
        classifier_version: CLASSIFIER_VERSION.to_string(),
        generated_at: Utc::now(),
        options: options.clone(),
        total_records: records.len(),
        first_year: records.iter().map(|record| record.year).min(),
        last_year: records.iter().map(|record| record.year).max(),
        unique_variables,
        with_question_text: harmonized.stats.with_question_text,
        with_confirmed: harmonized.stats.with_confirmed,
        confirmed_groups,
        narrow_bridges: harmonized.stats.narrow_bridges,
        expanded_keys: harmonized.stats.expansion.mapped_keys,
        concordance_conflicts: harmonized.stats.concordance_conflicts,
        issue_counts: IssueCounts::from_issues(&issues),
        issues,
        sources,
    }
}
