//! Classifier categories attached to every record.
//!
//! Substance and time-period labels come from the static classifier tables in
//! `bridge-core`, so they are carried as `&'static str`. Unrecognized input
//! maps to a sentinel instead of an error.

use serde::Serialize;
use std::fmt;

/// Substance label used when no substance pattern matches.
pub const OTHER_SUBSTANCE: &str = "other";

/// Time-period label used when the variable is not time-qualified.
///
/// Distinct from `"lifetime"`.
pub const UNQUALIFIED_PERIOD: &str = "";

/// What a variable measures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureType {
    /// Plain use measure (default).
    #[default]
    Use,
    /// Binary recode flag or indicator.
    UseIndicator,
    /// Age at first use.
    AgeFirstUse,
    /// Abuse or dependence measure.
    AbuseDependence,
}

impl MeasureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasureType::Use => "use",
            MeasureType::UseIndicator => "use_indicator",
            MeasureType::AgeFirstUse => "age_first_use",
            MeasureType::AbuseDependence => "abuse_dependence",
        }
    }
}

impl fmt::Display for MeasureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the feature extractor for one `(variable_name, label)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Features {
    pub substance: &'static str,
    pub time_period: &'static str,
    pub measure_type: MeasureType,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            substance: OTHER_SUBSTANCE,
            time_period: UNQUALIFIED_PERIOD,
            measure_type: MeasureType::Use,
        }
    }
}

impl Features {
    /// True when neither a substance nor a time period was recognized.
    pub fn is_unclassified(&self) -> bool {
        self.substance == OTHER_SUBSTANCE && self.time_period == UNQUALIFIED_PERIOD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_type_names_match_serde() {
        for measure in [
            MeasureType::Use,
            MeasureType::UseIndicator,
            MeasureType::AgeFirstUse,
            MeasureType::AbuseDependence,
        ] {
            let json = serde_json::to_string(&measure).unwrap();
            assert_eq!(json, format!("\"{measure}\""));
        }
    }

    #[test]
    fn default_features_are_sentinels() {
        let features = Features::default();
        assert_eq!(features.substance, "other");
        assert_eq!(features.time_period, "");
        assert_eq!(features.measure_type, MeasureType::Use);
        assert!(features.is_unclassified());
    }
}
