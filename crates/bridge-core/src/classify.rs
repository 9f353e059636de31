//! Semantic feature extraction.
//!
//! Classification runs over the upper-cased `"{variable_name} {label}"` text
//! against ordered pattern tables. Within each table the first matching rule
//! wins, so table order is the tie-break policy: reordering or editing a
//! table changes behavior and must bump [`CLASSIFIER_VERSION`].

use std::sync::LazyLock;

use regex::Regex;

use bridge_model::{Features, MeasureType, OTHER_SUBSTANCE, UNQUALIFIED_PERIOD};

/// Version of the classifier tables below.
pub const CLASSIFIER_VERSION: &str = "2024.1";

/// A labelled word-boundary pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternRule {
    pub label: &'static str,
    pub pattern: &'static str,
}

impl PatternRule {
    pub const fn new(label: &'static str, pattern: &'static str) -> Self {
        Self { label, pattern }
    }
}

/// A measure-type override and the tokens that trigger it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureRule {
    pub measure: MeasureType,
    pub pattern: &'static str,
}

impl MeasureRule {
    pub const fn new(measure: MeasureType, pattern: &'static str) -> Self {
        Self { measure, pattern }
    }
}

/// Substance abbreviation families, in priority order.
pub const SUBSTANCE_RULES: &[PatternRule] = &[
    PatternRule::new("marijuana", r"\b(MARIJUANA|MRJ|MJ)\b"),
    PatternRule::new("cocaine", r"\b(COCAINE|COC|CRACK|CRK)\b"),
    PatternRule::new("heroin", r"\b(HEROIN|HER)\b"),
    PatternRule::new("hallucinogen", r"\b(HALLUCINOGEN|HAL|LSD|PCP)\b"),
    PatternRule::new("alcohol", r"\b(ALCOHOL|ALC)\b"),
    PatternRule::new("tobacco", r"\b(TOBACCO|CIG|SMOKE)\b"),
    PatternRule::new("stimulant", r"\b(STIMULANT|STIM|METH)\b"),
    PatternRule::new("sedative", r"\b(SEDATIVE|SED)\b"),
    PatternRule::new("tranquilizer", r"\b(TRANQUILIZER|TRQ)\b"),
    PatternRule::new("painkiller", r"\b(PAIN|ANALGESIC|ANL)\b"),
    PatternRule::new("inhalant", r"\b(INHALANT|INH)\b"),
];

/// Recall periods, in priority order.
pub const TIME_PERIOD_RULES: &[PatternRule] = &[
    PatternRule::new("lifetime", r"\b(LIFETIME|EVER)\b"),
    PatternRule::new("past_30_days", r"\b(PAST\s*(30|MONTH|MO))\b"),
    PatternRule::new("past_year", r"\b(PAST\s*(YEAR|12|YR))\b"),
];

/// Measure-type overrides, checked in this order; [`MeasureType::Use`] otherwise.
pub const MEASURE_RULES: &[MeasureRule] = &[
    MeasureRule::new(MeasureType::UseIndicator, r"\b(FLAG|INDICATOR)\b"),
    MeasureRule::new(MeasureType::AgeFirstUse, r"\b(AGE|FIRST)\b"),
    MeasureRule::new(MeasureType::AbuseDependence, r"\b(ABUSE|DEPEND)\b"),
];

static SUBSTANCE_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> =
    LazyLock::new(|| compile_labelled(SUBSTANCE_RULES));

static TIME_PERIOD_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> =
    LazyLock::new(|| compile_labelled(TIME_PERIOD_RULES));

static MEASURE_PATTERNS: LazyLock<Vec<(MeasureType, Regex)>> = LazyLock::new(|| {
    MEASURE_RULES
        .iter()
        .map(|rule| (rule.measure, compile(rule.pattern)))
        .collect()
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("classifier tables contain valid regexes")
}

fn compile_labelled(rules: &[PatternRule]) -> Vec<(&'static str, Regex)> {
    rules
        .iter()
        .map(|rule| (rule.label, compile(rule.pattern)))
        .collect()
}

fn first_label(patterns: &[(&'static str, Regex)], text: &str) -> Option<&'static str> {
    patterns
        .iter()
        .find(|(_, regex)| regex.is_match(text))
        .map(|(label, _)| *label)
}

/// Substance label for classifier text, or `"other"`.
pub fn classify_substance(text: &str) -> &'static str {
    first_label(&SUBSTANCE_PATTERNS, text).unwrap_or(OTHER_SUBSTANCE)
}

/// Time-period label for classifier text, or `""` when not time-qualified.
pub fn classify_time_period(text: &str) -> &'static str {
    first_label(&TIME_PERIOD_PATTERNS, text).unwrap_or(UNQUALIFIED_PERIOD)
}

/// Measure type for classifier text.
pub fn classify_measure(text: &str) -> MeasureType {
    MEASURE_PATTERNS
        .iter()
        .find(|(_, regex)| regex.is_match(text))
        .map(|(measure, _)| *measure)
        .unwrap_or_default()
}

/// Classify a variable from its name and raw label.
pub fn extract_features(variable_name: &str, variable_label: Option<&str>) -> Features {
    let text = format!("{} {}", variable_name, variable_label.unwrap_or("")).to_uppercase();
    Features {
        substance: classify_substance(&text),
        time_period: classify_time_period(&text),
        measure_type: classify_measure(&text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_tables_compile() {
        assert_eq!(SUBSTANCE_PATTERNS.len(), SUBSTANCE_RULES.len());
        assert_eq!(TIME_PERIOD_PATTERNS.len(), TIME_PERIOD_RULES.len());
        assert_eq!(MEASURE_PATTERNS.len(), MEASURE_RULES.len());
    }

    #[test]
    fn classifies_lifetime_marijuana() {
        let features = extract_features("MRJFLAG", Some("MARIJUANA - EVER USED"));
        assert_eq!(features.substance, "marijuana");
        assert_eq!(features.time_period, "lifetime");
        assert_eq!(features.measure_type, MeasureType::Use);
    }

    #[test]
    fn abbreviations_need_word_boundaries() {
        // MRJ inside MRJFLAG is not a standalone token.
        assert_eq!(classify_substance("MRJFLAG"), "other");
        assert_eq!(classify_substance("MRJ FLAG"), "marijuana");
        assert_eq!(classify_substance("HERB"), "other");
    }

    #[test]
    fn first_substance_in_table_order_wins() {
        assert_eq!(classify_substance("ALCOHOL AND MARIJUANA"), "marijuana");
        assert_eq!(classify_substance("CIG OR CRACK"), "cocaine");
    }

    #[test]
    fn time_periods() {
        assert_eq!(classify_time_period("ALC PAST 30 DAYS"), "past_30_days");
        assert_eq!(classify_time_period("ALC PAST MONTH"), "past_30_days");
        assert_eq!(classify_time_period("ALC PAST12"), "past_year");
        assert_eq!(classify_time_period("CIG PAST YEAR EVER"), "lifetime");
        assert_eq!(classify_time_period("RESPONDENT ID"), "");
    }

    #[test]
    fn measure_priority_is_indicator_then_age_then_abuse() {
        assert_eq!(classify_measure("AGE FIRST USE FLAG"), MeasureType::UseIndicator);
        assert_eq!(classify_measure("AGE WHEN FIRST USED"), MeasureType::AgeFirstUse);
        assert_eq!(classify_measure("ALCOHOL ABUSE AGE"), MeasureType::AgeFirstUse);
        assert_eq!(classify_measure("ALCOHOL DEPEND"), MeasureType::AbuseDependence);
        assert_eq!(classify_measure("ALCOHOL DEPENDENCE"), MeasureType::Use);
        assert_eq!(classify_measure("RESPONDENT ID"), MeasureType::Use);
    }

    #[test]
    fn unclassifiable_input_maps_to_sentinels() {
        let features = extract_features("QUESTID", Some("RESPONDENT ID"));
        assert_eq!(features, Features::default());
        let features = extract_features("", None);
        assert_eq!(features, Features::default());
    }
}
