use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use scrub_model::{CleaningSummary, RuleTable, ScrubError};
use scrub_cli::types::{BatchResult, TableOutcome};

pub fn print_summary(result: &BatchResult) {
    if result.dry_run {
        println!("Dry run: no files written");
    } else {
        println!("Output: {}", result.output_dir.display());
    }
    if let Some(path) = &result.log_path {
        println!("Cleaning log: {}", path.display());
    }
    if let Some(path) = &result.sqlite {
        println!("SQLite: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Rows in"),
        header_cell("Rows out"),
        header_cell("Duplicates"),
        header_cell("Filled"),
        header_cell("Issues"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 6, CellAlignment::Center);

    let mut total_in = 0usize;
    let mut total_out = 0usize;
    let mut total_duplicates = 0usize;
    let mut total_filled = 0usize;
    let mut total_issues = 0usize;
    for (summary, outcome) in result.outcomes() {
        let issues = summary.cell_issue_count();
        total_in += summary.input_rows;
        total_duplicates += summary.duplicates_removed;
        total_filled += summary.missing_filled;
        total_issues += issues;
        let failed = matches!(outcome, TableOutcome::Failed(_));
        if !failed {
            total_out += summary.output_rows;
        }
        table.add_row(vec![
            Cell::new(summary.file_name())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            count_cell(summary.input_rows, None),
            if failed {
                dim_cell("-")
            } else {
                count_cell(summary.output_rows, None)
            },
            count_cell(summary.duplicates_removed, Some(Color::Yellow)),
            count_cell(summary.missing_filled, Some(Color::Yellow)),
            count_cell(issues, Some(Color::Red)),
            status_cell(summary, outcome),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_in).add_attribute(Attribute::Bold),
        Cell::new(total_out).add_attribute(Attribute::Bold),
        count_cell(total_duplicates, Some(Color::Yellow)).add_attribute(Attribute::Bold),
        count_cell(total_filled, Some(Color::Yellow)).add_attribute(Attribute::Bold),
        count_cell(total_issues, Some(Color::Red)).add_attribute(Attribute::Bold),
        dim_cell(format!(
            "{}/{} ok",
            result.tables.len() - result.failed_count(),
            result.tables.len()
        )),
    ]);
    println!("{table}");
    print_issue_table(result);

    if result.has_failures() {
        eprintln!("Failures:");
        for (_, outcome) in result.outcomes() {
            if let TableOutcome::Failed(failure) = outcome {
                eprintln!("- {failure}");
            }
        }
    }
    for summary in &result.tables {
        if let Some(err) = &summary.sink_error {
            eprintln!("- {err}");
        }
    }
}

fn print_issue_table(result: &BatchResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Issue"),
        header_cell("Role"),
        header_cell("Column"),
        header_cell("Count"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    let mut rows = 0usize;
    for summary in &result.tables {
        for issue in &summary.issues {
            rows += 1;
            table.add_row(vec![
                Cell::new(summary.file_name()),
                Cell::new(issue.kind.as_str()).fg(Color::Yellow),
                optional_cell(issue.role.map(|role| role.to_string())),
                optional_cell(issue.column.clone()),
                Cell::new(issue.count),
                optional_cell(issue.detail.clone()),
            ]);
        }
    }
    if rows == 0 {
        return;
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

/// Print the active rule table for `scrub roles`.
pub fn print_roles(rules: &RuleTable) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Role"),
        header_cell("Rule"),
        header_cell("Column labels (first match wins)"),
    ]);
    apply_table_style(&mut table);
    for set in rules.iter() {
        table.add_row(vec![
            Cell::new(set.role.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(set.kind().as_str()),
            Cell::new(set.aliases.join(", ")),
        ]);
    }
    println!("{table}");
}

fn status_cell(summary: &CleaningSummary, outcome: TableOutcome<'_>) -> Cell {
    match outcome {
        TableOutcome::Failed(_) => Cell::new(format!("failed ({})", failed_stage(summary)))
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        TableOutcome::Cleaned { output: Some(_) } if summary.sink_error.is_some() => {
            Cell::new("✓ sink failed").fg(Color::Yellow)
        }
        TableOutcome::Cleaned { output: Some(_) } => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        TableOutcome::Cleaned { output: None } => Cell::new("cleaned").fg(Color::Green),
    }
}

fn failed_stage(summary: &CleaningSummary) -> &'static str {
    match &summary.failure {
        Some(ScrubError::TableProcessingFailed { stage, .. }) => stage.as_str(),
        _ => "unknown stage",
    }
}

fn apply_table_style(table: &mut Table) {
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, highlight: Option<Color>) -> Cell {
    match highlight {
        Some(color) if count > 0 => Cell::new(count).fg(color).add_attribute(Attribute::Bold),
        Some(_) => dim_cell(count),
        None => Cell::new(count),
    }
}

fn optional_cell(value: Option<String>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
