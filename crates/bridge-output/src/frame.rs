//! Output table construction.

use bridge_model::VariableRecord;
use polars::prelude::*;

/// Output columns, in file order.
pub const OUTPUT_COLUMNS: [&str; 12] = [
    "year",
    "variable_name",
    "variable_label",
    "question_text",
    "confirmed_group",
    "concordance_file",
    "cross_year_confirmed",
    "clean_label",
    "substance",
    "time_period",
    "measure_type",
    "cross_year_narrow",
];

fn text_column<'a>(
    name: &str,
    records: &'a [VariableRecord],
    value: impl Fn(&'a VariableRecord) -> &'a str,
) -> Column {
    let values: Vec<&str> = records.iter().map(value).collect();
    Column::new(name.into(), values)
}

fn optional_column<'a>(
    name: &str,
    records: &'a [VariableRecord],
    value: impl Fn(&'a VariableRecord) -> Option<&'a str>,
) -> Column {
    let values: Vec<Option<&str>> = records.iter().map(value).collect();
    Column::new(name.into(), values)
}

/// Build the bridge table with one row per record, in record order.
pub fn build_output_frame(records: &[VariableRecord]) -> PolarsResult<DataFrame> {
    let years: Vec<i32> = records.iter().map(|r| r.year).collect();
    let columns = vec![
        Column::new(OUTPUT_COLUMNS[0].into(), years),
        text_column(OUTPUT_COLUMNS[1], records, |r| r.variable_name.as_str()),
        optional_column(OUTPUT_COLUMNS[2], records, |r| r.variable_label.as_deref()),
        text_column(OUTPUT_COLUMNS[3], records, |r| r.question_text.as_str()),
        optional_column(OUTPUT_COLUMNS[4], records, |r| r.confirmed_group.as_deref()),
        optional_column(OUTPUT_COLUMNS[5], records, |r| r.concordance_file.as_deref()),
        text_column(OUTPUT_COLUMNS[6], records, |r| r.cross_year_confirmed.as_str()),
        text_column(OUTPUT_COLUMNS[7], records, |r| r.clean_label.as_str()),
        text_column(OUTPUT_COLUMNS[8], records, |r| r.substance),
        text_column(OUTPUT_COLUMNS[9], records, |r| r.time_period),
        text_column(OUTPUT_COLUMNS[10], records, |r| r.measure_type.as_str()),
        text_column(OUTPUT_COLUMNS[11], records, |r| r.cross_year_narrow.as_str()),
    ];
    DataFrame::new(columns)
}
