//! Harmonization pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Merge**: Left-join question text and concordance onto the base rows
//! 2. **Classify**: Normalize labels, extract features, build narrow keys
//! 3. **Expand**: Let confirmed crosswalk groups override heuristic keys
//! 4. **Assign**: Pick one canonical bridge id per equivalence class
//!
//! Each stage consumes the previous stage's table and returns a new one.
//! Merge and classify are per-record; expand and assign need the whole table.

use std::collections::HashSet;
use std::time::Instant;

use bridge_model::{
    BridgeOptions, ConcordanceEntry, ConfirmedScope, ExpansionMode, MetadataRow, QuestionTexts,
    SourceRecord, VariableRecord,
};
use tracing::{debug, info, info_span};

use crate::assign::assign_bridges;
use crate::error::{BridgeError, Result};
use crate::expand::{ExpansionStats, expand_keys};
use crate::key::KeyedRecord;
use crate::merge::{MergeOutcome, merge_sources};

/// The already-parsed input tables.
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    pub metadata: Vec<MetadataRow>,
    pub questions: QuestionTexts,
    pub concordance: Vec<ConcordanceEntry>,
}

/// Counters collected across stages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub with_question_text: usize,
    pub with_confirmed: usize,
    pub concordance_conflicts: usize,
    pub expansion: ExpansionStats,
    pub narrow_bridges: usize,
}

/// Final table plus run counters.
#[derive(Debug, Clone)]
pub struct Harmonized {
    pub records: Vec<VariableRecord>,
    pub stats: PipelineStats,
}

// ============================================================================
// Stage 1: Merge
// ============================================================================

/// Check the base table invariants and join the optional sources.
pub fn merge_stage(tables: SourceTables, scope: ConfirmedScope) -> Result<MergeOutcome> {
    if tables.metadata.is_empty() {
        return Err(BridgeError::EmptyMetadata);
    }
    let mut seen: HashSet<(i32, &str)> = HashSet::with_capacity(tables.metadata.len());
    for row in &tables.metadata {
        if !seen.insert((row.year, row.variable_name.as_str())) {
            return Err(BridgeError::DuplicateRecord {
                year: row.year,
                variable_name: row.variable_name.clone(),
            });
        }
    }
    Ok(merge_sources(
        tables.metadata,
        &tables.questions,
        &tables.concordance,
        scope,
    ))
}

// ============================================================================
// Stage 2: Classify
// ============================================================================

/// Run the label normalizer, feature extractor and key builder per record.
pub fn classify_stage(records: Vec<SourceRecord>) -> Vec<KeyedRecord> {
    records.into_iter().map(KeyedRecord::from_source).collect()
}

// ============================================================================
// Stage 3: Expand
// ============================================================================

pub fn expand_stage(
    mut records: Vec<KeyedRecord>,
    mode: ExpansionMode,
) -> (Vec<KeyedRecord>, ExpansionStats) {
    let stats = expand_keys(&mut records, mode);
    (records, stats)
}

// ============================================================================
// Stage 4: Assign
// ============================================================================

/// Assign bridge ids and order the output by `(year, variable_name)`.
pub fn assign_stage(records: Vec<KeyedRecord>) -> Vec<VariableRecord> {
    let mut assigned = assign_bridges(records);
    assigned.sort_by(|a, b| {
        a.year
            .cmp(&b.year)
            .then_with(|| a.variable_name.cmp(&b.variable_name))
    });
    assigned
}

/// Run every stage in order.
pub fn harmonize(tables: SourceTables, options: &BridgeOptions) -> Result<Harmonized> {
    let base_rows = tables.metadata.len();
    let run_span = info_span!(
        "harmonize",
        base_rows,
        expansion = options.expansion.as_str(),
        confirmed_scope = options.confirmed_scope.as_str()
    );
    let _run_guard = run_span.enter();

    let merged = info_span!("merge").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let merged = merge_stage(tables, options.confirmed_scope)?;
        info!(
            records = merged.records.len(),
            with_question_text = merged.with_question_text,
            with_confirmed = merged.with_confirmed,
            concordance_conflicts = merged.concordance_conflicts,
            duration_ms = start.elapsed().as_millis(),
            "merge complete"
        );
        Ok(merged)
    })?;
    let MergeOutcome {
        records,
        with_question_text,
        with_confirmed,
        concordance_conflicts,
    } = merged;

    let keyed = info_span!("classify").in_scope(|| {
        let start = Instant::now();
        let keyed = classify_stage(records);
        let unclassified = keyed
            .iter()
            .filter(|record| record.features.is_unclassified())
            .count();
        info!(
            records = keyed.len(),
            unclassified,
            duration_ms = start.elapsed().as_millis(),
            "classify complete"
        );
        keyed
    });

    let (expanded, expansion) = info_span!("expand").in_scope(|| {
        let start = Instant::now();
        let (expanded, stats) = expand_stage(keyed, options.expansion);
        info!(
            confirmed_groups = stats.confirmed_groups,
            mapped_keys = stats.mapped_keys,
            dropped_claims = stats.dropped_claims,
            rewritten_records = stats.rewritten_records,
            duration_ms = start.elapsed().as_millis(),
            "expand complete"
        );
        (expanded, stats)
    });

    let records = info_span!("assign").in_scope(|| {
        let start = Instant::now();
        let records = assign_stage(expanded);
        debug!(
            records = records.len(),
            duration_ms = start.elapsed().as_millis(),
            "assign complete"
        );
        records
    });

    let narrow_bridges = records
        .iter()
        .map(|record| record.cross_year_narrow.as_str())
        .collect::<HashSet<_>>()
        .len();
    info!(records = records.len(), narrow_bridges, "harmonization complete");

    Ok(Harmonized {
        records,
        stats: PipelineStats {
            with_question_text,
            with_confirmed,
            concordance_conflicts,
            expansion,
            narrow_bridges,
        },
    })
}
