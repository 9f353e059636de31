//! Joins of the optional sources onto the base metadata.

use std::collections::HashMap;

use bridge_model::{ConcordanceEntry, ConfirmedScope, MetadataRow, QuestionTexts, SourceRecord};
use tracing::debug;

/// Merged records plus join counters.
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    pub records: Vec<SourceRecord>,
    pub with_question_text: usize,
    pub with_confirmed: usize,
    /// Concordance entries dropped because an earlier entry already covered
    /// the same `(year, variable_name)`.
    pub concordance_conflicts: usize,
}

/// Index concordance entries by `(year, variable_name)`.
///
/// When several entries cover the same slot, the one with the smallest
/// `(concordance_file, confirmed_group)` is kept, so the choice never depends
/// on entry order. The preferred crosswalk files sort in their load order.
pub fn index_concordance(
    entries: &[ConcordanceEntry],
) -> (HashMap<(i32, &str), &ConcordanceEntry>, usize) {
    let mut index: HashMap<(i32, &str), &ConcordanceEntry> = HashMap::new();
    let mut conflicts = 0usize;
    for entry in entries {
        if entry.confirmed_group.trim().is_empty() {
            continue;
        }
        let slot = (entry.year, entry.variable_name.as_str());
        let Some(existing) = index.get_mut(&slot) else {
            index.insert(slot, entry);
            continue;
        };
        conflicts += 1;
        let (kept, dropped) = if precedence(entry) < precedence(existing) {
            (entry, std::mem::replace(existing, entry))
        } else {
            (*existing, entry)
        };
        debug!(
            year = entry.year,
            variable_name = %entry.variable_name,
            kept = %kept.concordance_file,
            dropped = %dropped.concordance_file,
            "duplicate concordance entry"
        );
    }
    (index, conflicts)
}

fn precedence(entry: &ConcordanceEntry) -> (&str, &str) {
    (&entry.concordance_file, &entry.confirmed_group)
}

/// Compose the confirmed cross-year id for a crosswalk entry.
pub fn confirmed_id(
    variable_name: &str,
    concordance_file: &str,
    confirmed_group: &str,
    scope: ConfirmedScope,
) -> String {
    match scope {
        ConfirmedScope::Variable => format!("{variable_name}_{concordance_file}_{confirmed_group}"),
        ConfirmedScope::Group => format!("{concordance_file}_{confirmed_group}"),
    }
}

/// Left-join question text and concordance onto the base rows.
///
/// Missing matches leave the optional columns empty.
pub fn merge_sources(
    base: Vec<MetadataRow>,
    questions: &QuestionTexts,
    concordance: &[ConcordanceEntry],
    scope: ConfirmedScope,
) -> MergeOutcome {
    let (index, concordance_conflicts) = index_concordance(concordance);
    let mut outcome = MergeOutcome {
        records: Vec::with_capacity(base.len()),
        concordance_conflicts,
        ..MergeOutcome::default()
    };

    for row in base {
        let question_text = questions
            .get(&row.year)
            .and_then(|by_name| by_name.get(&row.variable_name))
            .cloned()
            .unwrap_or_default();
        if !question_text.is_empty() {
            outcome.with_question_text += 1;
        }

        let entry = index.get(&(row.year, row.variable_name.as_str())).copied();
        let cross_year_confirmed = entry
            .map(|entry| {
                confirmed_id(
                    &row.variable_name,
                    &entry.concordance_file,
                    &entry.confirmed_group,
                    scope,
                )
            })
            .unwrap_or_default();
        if entry.is_some() {
            outcome.with_confirmed += 1;
        }

        outcome.records.push(SourceRecord {
            year: row.year,
            variable_name: row.variable_name,
            variable_label: row.variable_label,
            question_text,
            confirmed_group: entry.map(|entry| entry.confirmed_group.clone()),
            concordance_file: entry.map(|entry| entry.concordance_file.clone()),
            cross_year_confirmed,
        });
    }
    outcome
}
