//! Record types for each stage of the bridge build.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::{Features, MeasureType};

/// One variable-year row from the base metadata source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRow {
    pub year: i32,
    /// Upper-cased canonical variable name.
    pub variable_name: String,
    pub variable_label: Option<String>,
    /// Value labels formatted as `1=Label1; 2=Label2`.
    pub value_labels: String,
}

impl MetadataRow {
    pub fn new(year: i32, variable_name: impl Into<String>, variable_label: Option<&str>) -> Self {
        Self {
            year,
            variable_name: variable_name.into(),
            variable_label: variable_label.map(str::to_string),
            value_labels: String::new(),
        }
    }
}

/// One long-format crosswalk entry from the agency concordance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcordanceEntry {
    pub year: i32,
    pub variable_name: String,
    pub confirmed_group: String,
    /// File name the entry was read from.
    pub concordance_file: String,
}

/// Question wording keyed by year, then by upper-cased variable name.
pub type QuestionTexts = BTreeMap<i32, BTreeMap<String, String>>;

/// A base row after the question-text and concordance joins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRecord {
    pub year: i32,
    pub variable_name: String,
    pub variable_label: Option<String>,
    /// Empty when no question text is known.
    pub question_text: String,
    pub confirmed_group: Option<String>,
    pub concordance_file: Option<String>,
    /// Empty when the record has no confirmed group.
    pub cross_year_confirmed: String,
}

impl SourceRecord {
    pub fn has_confirmed(&self) -> bool {
        !self.cross_year_confirmed.is_empty()
    }
}

/// Final output row: one per `(year, variable_name)` of the base source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableRecord {
    pub year: i32,
    pub variable_name: String,
    pub variable_label: Option<String>,
    pub question_text: String,
    pub confirmed_group: Option<String>,
    pub concordance_file: Option<String>,
    pub cross_year_confirmed: String,
    pub clean_label: String,
    pub substance: &'static str,
    pub time_period: &'static str,
    pub measure_type: MeasureType,
    pub cross_year_narrow: String,
}

impl VariableRecord {
    pub fn from_parts(
        source: SourceRecord,
        clean_label: String,
        features: Features,
        cross_year_narrow: String,
    ) -> Self {
        Self {
            year: source.year,
            variable_name: source.variable_name,
            variable_label: source.variable_label,
            question_text: source.question_text,
            confirmed_group: source.confirmed_group,
            concordance_file: source.concordance_file,
            cross_year_confirmed: source.cross_year_confirmed,
            clean_label,
            substance: features.substance,
            time_period: features.time_period,
            measure_type: features.measure_type,
            cross_year_narrow,
        }
    }
}

/// Canonical bridge id for a group represented by `variable_name` in `year`.
pub fn bridge_id(variable_name: &str, year: i32) -> String {
    format!("{variable_name}_narrow_{year}")
}
