//! End-to-end harmonization scenarios over small in-memory tables.

use bridge_core::{SourceTables, clean_label, harmonize};
use bridge_model::{
    BridgeOptions, ConcordanceEntry, ConfirmedScope, ExpansionMode, MeasureType, MetadataRow,
    VariableRecord,
};
use serde::Serialize;

fn concordance(year: i32, name: &str, group: &str) -> ConcordanceEntry {
    ConcordanceEntry {
        year,
        variable_name: name.to_string(),
        confirmed_group: group.to_string(),
        concordance_file: "PUFComparability_2024.csv".to_string(),
    }
}

fn find<'a>(records: &'a [VariableRecord], year: i32, name: &str) -> &'a VariableRecord {
    records
        .iter()
        .find(|r| r.year == year && r.variable_name == name)
        .unwrap_or_else(|| panic!("missing record {name} {year}"))
}

#[test]
fn repeated_lifetime_flag_shares_a_bridge() {
    let tables = SourceTables {
        metadata: vec![
            MetadataRow::new(2002, "MRJFLAG", Some("MARIJUANA - EVER USED")),
            MetadataRow::new(2003, "MRJFLAG", Some("MARIJUANA - EVER USED")),
        ],
        ..SourceTables::default()
    };
    let result = harmonize(tables, &BridgeOptions::default()).unwrap();
    for record in &result.records {
        assert_eq!(record.substance, "marijuana");
        assert_eq!(record.time_period, "lifetime");
        assert_eq!(record.clean_label, "MARIJUANA");
        assert_eq!(record.cross_year_confirmed, "");
        assert_eq!(record.cross_year_narrow, "MRJFLAG_narrow_2002");
    }
}

#[test]
fn confirmed_group_collapses_renamed_variable() {
    let tables = SourceTables {
        metadata: vec![
            MetadataRow::new(2002, "MRJFLAG", Some("MARIJUANA - EVER USED")),
            MetadataRow::new(2010, "MARJFLAG", Some("RC-EVER USED MARIJUANA OR HASHISH")),
        ],
        concordance: vec![
            concordance(2002, "MRJFLAG", "MRJ_01"),
            concordance(2010, "MARJFLAG", "MRJ_01"),
        ],
        ..SourceTables::default()
    };
    let options = BridgeOptions::new().with_confirmed_scope(ConfirmedScope::Group);
    let result = harmonize(tables, &options).unwrap();

    let early = find(&result.records, 2002, "MRJFLAG");
    let late = find(&result.records, 2010, "MARJFLAG");
    assert_ne!(early.clean_label, late.clean_label);
    assert_eq!(early.cross_year_confirmed, late.cross_year_confirmed);
    assert_eq!(early.cross_year_narrow, "MRJFLAG_narrow_2002");
    assert_eq!(late.cross_year_narrow, "MRJFLAG_narrow_2002");
}

#[test]
fn variable_scope_keeps_renamed_variables_apart() {
    let tables = SourceTables {
        metadata: vec![
            MetadataRow::new(2002, "MRJFLAG", Some("MARIJUANA - EVER USED")),
            MetadataRow::new(2010, "MARJFLAG", Some("RC-EVER USED MARIJUANA OR HASHISH")),
        ],
        concordance: vec![
            concordance(2002, "MRJFLAG", "MRJ_01"),
            concordance(2010, "MARJFLAG", "MRJ_01"),
        ],
        ..SourceTables::default()
    };
    let result = harmonize(tables, &BridgeOptions::default()).unwrap();
    let early = find(&result.records, 2002, "MRJFLAG");
    let late = find(&result.records, 2010, "MARJFLAG");
    assert_eq!(
        early.cross_year_confirmed,
        "MRJFLAG_PUFComparability_2024.csv_MRJ_01"
    );
    assert_ne!(early.cross_year_narrow, late.cross_year_narrow);
}

#[test]
fn stacked_prefixes_are_removed() {
    assert_eq!(clean_label(Some("RC-ADULT: COCAINE - EVER USED")), "COCAINE");
}

#[test]
fn unclassifiable_variable_stays_on_its_own() {
    let tables = SourceTables {
        metadata: vec![
            MetadataRow::new(2002, "QUESTID", Some("RESPONDENT ID")),
            MetadataRow::new(2002, "MRJFLAG", Some("MARIJUANA - EVER USED")),
            MetadataRow::new(2003, "QUESTID", Some("RESPONDENT ID")),
        ],
        ..SourceTables::default()
    };
    let result = harmonize(tables, &BridgeOptions::default()).unwrap();
    let id = find(&result.records, 2003, "QUESTID");
    assert_eq!(id.substance, "other");
    assert_eq!(id.time_period, "");
    assert_eq!(id.measure_type, MeasureType::Use);
    assert_eq!(id.cross_year_narrow, "QUESTID_narrow_2002");
    assert_ne!(
        id.cross_year_narrow,
        find(&result.records, 2002, "MRJFLAG").cross_year_narrow
    );
}

#[test]
fn indicator_rule_precedes_age_rule() {
    let tables = SourceTables {
        metadata: vec![MetadataRow::new(2015, "IRMJAGE", Some("AGE FIRST USE FLAG"))],
        ..SourceTables::default()
    };
    let result = harmonize(tables, &BridgeOptions::default()).unwrap();
    assert_eq!(result.records[0].measure_type, MeasureType::UseIndicator);
}

#[test]
fn missing_optional_sources_leave_columns_empty() {
    let tables = SourceTables {
        metadata: vec![MetadataRow::new(1979, "ALCEVER", Some("ALCOHOL - EVER USED"))],
        ..SourceTables::default()
    };
    let result = harmonize(tables, &BridgeOptions::default()).unwrap();
    let record = &result.records[0];
    assert_eq!(record.question_text, "");
    assert!(record.confirmed_group.is_none());
    assert!(record.concordance_file.is_none());
    assert_eq!(result.stats.with_question_text, 0);
    assert_eq!(result.stats.with_confirmed, 0);
}

fn chained_tables() -> SourceTables {
    // Two confirmed groups linked only through a shared heuristic key.
    SourceTables {
        metadata: vec![
            MetadataRow::new(2002, "ALCREC", Some("ALCOHOL RECENCY")),
            MetadataRow::new(2003, "ALCREC", Some("ALCOHOL RECENCY - RECODE")),
            MetadataRow::new(2004, "ALCREC", Some("ALCOHOL RECENCY - RECODE")),
            MetadataRow::new(2005, "ALCREC", Some("ALCOHOL RECENCY (RECODED)")),
        ],
        concordance: vec![
            concordance(2002, "ALCREC", "A"),
            concordance(2003, "ALCREC", "A"),
            concordance(2004, "ALCREC", "B"),
            concordance(2005, "ALCREC", "B"),
        ],
        ..SourceTables::default()
    }
}

#[test]
fn first_claim_expansion_is_single_pass() {
    let result = harmonize(chained_tables(), &BridgeOptions::default()).unwrap();
    assert_eq!(find(&result.records, 2004, "ALCREC").cross_year_narrow, "ALCREC_narrow_2002");
    assert_eq!(find(&result.records, 2005, "ALCREC").cross_year_narrow, "ALCREC_narrow_2005");
    assert_eq!(result.stats.expansion.dropped_claims, 1);
}

#[test]
fn transitive_expansion_closes_chains() {
    let options = BridgeOptions::new().with_expansion(ExpansionMode::Transitive);
    let result = harmonize(chained_tables(), &options).unwrap();
    assert!(
        result
            .records
            .iter()
            .all(|r| r.cross_year_narrow == "ALCREC_narrow_2002")
    );
    assert_eq!(result.stats.narrow_bridges, 1);
}

#[test]
fn conflicting_crosswalk_rows_do_not_depend_on_order() {
    let metadata = vec![
        MetadataRow::new(2002, "ALCREC", Some("ALCOHOL RECENCY")),
        MetadataRow::new(2003, "ALCREC", Some("ALCOHOL RECENCY - RECODE")),
    ];
    let forward = vec![
        concordance(2002, "ALCREC", "A"),
        concordance(2002, "ALCREC", "B"),
        concordance(2003, "ALCREC", "A"),
    ];
    let mut swapped = forward.clone();
    swapped.swap(0, 1);

    let run = |concordance: Vec<ConcordanceEntry>| {
        let tables = SourceTables {
            metadata: metadata.clone(),
            concordance,
            ..SourceTables::default()
        };
        let result = harmonize(tables, &BridgeOptions::default()).unwrap();
        result
            .records
            .into_iter()
            .map(|r| (r.year, r.confirmed_group, r.cross_year_narrow))
            .collect::<Vec<_>>()
    };

    let expected = vec![
        (2002, Some("A".to_string()), "ALCREC_narrow_2002".to_string()),
        (2003, Some("A".to_string()), "ALCREC_narrow_2002".to_string()),
    ];
    assert_eq!(run(forward), expected);
    assert_eq!(run(swapped), expected);
}

#[derive(Serialize)]
struct Bridged<'a> {
    year: i32,
    variable_name: &'a str,
    clean_label: &'a str,
    substance: &'a str,
    time_period: &'a str,
    measure_type: MeasureType,
    cross_year_narrow: &'a str,
}

#[test]
fn bridged_table_snapshot() {
    let tables = SourceTables {
        metadata: vec![
            MetadataRow::new(2003, "CIGFLAG", Some("CIGARETTES - EVER USED")),
            MetadataRow::new(2002, "CIGFLAG", Some("RC-CIGARETTES - EVER USED")),
            MetadataRow::new(2002, "ALCMON", Some("YOUTH: ALCOHOL PAST 30 DAYS")),
        ],
        ..SourceTables::default()
    };
    let result = harmonize(tables, &BridgeOptions::default()).unwrap();
    let projection: Vec<Bridged<'_>> = result
        .records
        .iter()
        .map(|r| Bridged {
            year: r.year,
            variable_name: &r.variable_name,
            clean_label: &r.clean_label,
            substance: r.substance,
            time_period: r.time_period,
            measure_type: r.measure_type,
            cross_year_narrow: &r.cross_year_narrow,
        })
        .collect();

    insta::assert_json_snapshot!(projection, @r#"
    [
      {
        "year": 2002,
        "variable_name": "ALCMON",
        "clean_label": "ALCOHOL PAST 30 DAYS",
        "substance": "alcohol",
        "time_period": "past_30_days",
        "measure_type": "use",
        "cross_year_narrow": "ALCMON_narrow_2002"
      },
      {
        "year": 2002,
        "variable_name": "CIGFLAG",
        "clean_label": "CIGARETTES",
        "substance": "other",
        "time_period": "lifetime",
        "measure_type": "use",
        "cross_year_narrow": "CIGFLAG_narrow_2002"
      },
      {
        "year": 2003,
        "variable_name": "CIGFLAG",
        "clean_label": "CIGARETTES",
        "substance": "other",
        "time_period": "lifetime",
        "measure_type": "use",
        "cross_year_narrow": "CIGFLAG_narrow_2002"
      }
    ]
    "#);
}
