//! Harmonization engine for cross-year survey variables.
//!
//! Turns per-year variable metadata into a table where every variable-year
//! carries a `cross_year_narrow` bridge id shared by all records that measure
//! the same thing. See [`pipeline::harmonize`] for the stage order.

pub mod assign;
pub mod classify;
pub mod error;
pub mod expand;
pub mod key;
pub mod merge;
pub mod normalize;
pub mod pipeline;
pub mod report;

pub use assign::{assign_bridges, representatives};
pub use classify::{
    CLASSIFIER_VERSION, MEASURE_RULES, MeasureRule, PatternRule, SUBSTANCE_RULES,
    TIME_PERIOD_RULES, classify_measure, classify_substance, classify_time_period,
    extract_features,
};
pub use error::{BridgeError, Result};
pub use expand::{ExpansionStats, KeyMapping, expand_keys, first_claim_mapping, transitive_mapping};
pub use key::{KeyedRecord, build_narrow_key};
pub use merge::{MergeOutcome, confirmed_id, index_concordance, merge_sources};
pub use normalize::clean_label;
pub use pipeline::{
    Harmonized, PipelineStats, SourceTables, assign_stage, classify_stage, expand_stage,
    harmonize, merge_stage,
};
pub use report::build_report;
