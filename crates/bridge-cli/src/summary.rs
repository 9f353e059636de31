use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use bridge_cli::pipeline::BuildResult;
use bridge_model::{IssueKind, RunReport};

pub fn print_summary(result: &BuildResult) {
    let report = &result.report;
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run)"),
    }
    if let Some(path) = &result.report_path {
        println!("Run report: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (metric, value) in summary_rows(report) {
        table.add_row(vec![Cell::new(metric), value]);
    }
    table.add_row(vec![
        Cell::new("Degraded sources")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(report.issue_counts.degraded_sources, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Skipped records")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(report.issue_counts.malformed_records, Color::Yellow),
    ]);
    println!("{table}");
    print_issue_table(report);
}

fn summary_rows(report: &RunReport) -> Vec<(&'static str, Cell)> {
    let years = match (report.first_year, report.last_year) {
        (Some(first), Some(last)) => format!("{first}-{last}"),
        _ => "-".to_string(),
    };
    vec![
        ("Classifier version", Cell::new(&report.classifier_version)),
        ("Expansion", Cell::new(report.options.expansion.as_str())),
        ("Confirmed scope", Cell::new(report.options.confirmed_scope.as_str())),
        ("Accepted years", Cell::new(report.options.years)),
        ("Total records", Cell::new(report.total_records)),
        ("Years", Cell::new(years)),
        ("Unique variables", Cell::new(report.unique_variables)),
        ("With question text", Cell::new(report.with_question_text)),
        ("With confirmed group", Cell::new(report.with_confirmed)),
        ("Confirmed groups", Cell::new(report.confirmed_groups)),
        ("Keys merged by crosswalk", Cell::new(report.expanded_keys)),
        (
            "Crosswalk conflicts",
            count_cell(report.concordance_conflicts, Color::Yellow),
        ),
        (
            "Narrow bridges",
            Cell::new(report.narrow_bridges).add_attribute(Attribute::Bold),
        ),
    ]
}

fn print_issue_table(report: &RunReport) {
    if report.issues.is_empty() {
        return;
    }
    let mut issues: Vec<_> = report.issues.iter().collect();
    issues.sort_by(|a, b| (a.kind, a.source).cmp(&(b.kind, b.source)));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Source"),
        header_cell("Path"),
        header_cell("Detail"),
    ]);
    apply_issue_table_style(&mut table);
    for issue in issues {
        let path = issue
            .path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            kind_cell(issue.kind),
            Cell::new(issue.source.as_str()),
            dim_cell(path),
            Cell::new(&issue.detail),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn kind_cell(kind: IssueKind) -> Cell {
    let color = match kind {
        IssueKind::SourceDegraded => Color::Yellow,
        IssueKind::MalformedRecord => Color::DarkYellow,
    };
    Cell::new(kind.as_str()).fg(color)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
