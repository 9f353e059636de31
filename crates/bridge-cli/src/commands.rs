use anyhow::{Context, Result};
use comfy_table::Table;

use bridge_cli::pipeline::{BuildConfig, BuildResult, run_build as run_pipeline};
use bridge_core::{CLASSIFIER_VERSION, MEASURE_RULES, SUBSTANCE_RULES, TIME_PERIOD_RULES};
use bridge_model::{BridgeOptions, ConfirmedScope, ExpansionMode, YearRange};

use crate::cli::{BuildArgs, ConfirmedScopeArg, ExpansionArg};
use crate::summary::apply_table_style;

pub fn run_patterns() -> Result<()> {
    println!("Classifier version: {CLASSIFIER_VERSION}");
    let mut table = Table::new();
    table.set_header(vec!["Feature", "Priority", "Label", "Pattern"]);
    apply_table_style(&mut table);
    let labelled = [
        ("substance", SUBSTANCE_RULES),
        ("time_period", TIME_PERIOD_RULES),
    ];
    for (feature, rules) in labelled {
        for (priority, rule) in rules.iter().enumerate() {
            table.add_row(vec![
                feature.to_string(),
                (priority + 1).to_string(),
                rule.label.to_string(),
                rule.pattern.to_string(),
            ]);
        }
    }
    for (priority, rule) in MEASURE_RULES.iter().enumerate() {
        table.add_row(vec![
            "measure_type".to_string(),
            (priority + 1).to_string(),
            rule.measure.to_string(),
            rule.pattern.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_build(args: &BuildArgs) -> Result<BuildResult> {
    let years = YearRange::new(args.first_year, args.last_year).context("year range")?;
    let options = BridgeOptions::new()
        .with_years(years)
        .with_expansion(match args.expansion {
            ExpansionArg::FirstClaim => ExpansionMode::FirstClaim,
            ExpansionArg::Transitive => ExpansionMode::Transitive,
        })
        .with_confirmed_scope(match args.confirmed_scope {
            ConfirmedScopeArg::Variable => ConfirmedScope::Variable,
            ConfirmedScopeArg::Group => ConfirmedScope::Group,
        });

    let config = BuildConfig {
        questions: args.questions.clone(),
        concordance: args.concordance.clone(),
        report: args.report.clone(),
        options,
        dry_run: args.dry_run,
        ..BuildConfig::new(&args.metadata, &args.output)
    };
    run_pipeline(&config)
}
