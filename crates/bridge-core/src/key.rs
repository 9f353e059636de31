//! Heuristic key construction.

use bridge_model::{BridgeKey, Features, NarrowKey, SourceRecord};

use crate::classify::extract_features;
use crate::normalize::clean_label;

/// Build the narrow key from its four components.
///
/// Pure and total. `measure_type` is deliberately not part of the key.
pub fn build_narrow_key(variable_name: &str, clean_label: &str, features: &Features) -> NarrowKey {
    NarrowKey {
        variable_name: variable_name.to_string(),
        clean_label: clean_label.to_string(),
        time_period: features.time_period,
        substance: features.substance,
    }
}

/// A merged record with its classifier output and current grouping key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedRecord {
    pub source: SourceRecord,
    pub clean_label: String,
    pub features: Features,
    pub key: BridgeKey,
}

impl KeyedRecord {
    /// Normalize, classify and key a single record.
    pub fn from_source(source: SourceRecord) -> Self {
        let label = source.variable_label.as_deref();
        let clean_label = clean_label(label);
        let features = extract_features(&source.variable_name, label);
        let key = build_narrow_key(&source.variable_name, &clean_label, &features).into();
        Self {
            source,
            clean_label,
            features,
            key,
        }
    }

    /// The heuristic key this record was built with, independent of expansion.
    pub fn narrow_key(&self) -> NarrowKey {
        build_narrow_key(&self.source.variable_name, &self.clean_label, &self.features)
    }
}
