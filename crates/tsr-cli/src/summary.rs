use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use tsr_report::{LegendEntry, ReportOutcome};

use crate::types::ReportRun;

pub fn print_summary(run: &ReportRun) {
    println!("Report: {}", run.summary.name);
    println!("Group: {}", run.group);
    println!("Sink: {}", run.sink);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Report"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Time (ms)"),
        header_cell("Destination"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    let mut total_rows = 0usize;
    for outcome in &run.summary.outcomes {
        total_rows += outcome.rows;
        table.add_row(vec![
            report_cell(outcome),
            count_cell(outcome),
            Cell::new(outcome.columns),
            Cell::new(outcome.elapsed.as_millis()),
            destination_cell(outcome),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell(format!("{} failed", run.summary.failure_count())),
    ]);
    println!("{table}");

    for (kind, entries) in &run.legends {
        println!("{kind} columns:");
        print_legend(entries);
    }

    let failures: Vec<&ReportOutcome> = run.summary.failures().collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for outcome in failures {
            if let Some(error) = &outcome.error {
                eprintln!("- {}: {error}", outcome.kind);
            }
        }
    }
}

fn print_legend(entries: &[LegendEntry]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Code"), header_cell("Description")]);
    apply_table_style(&mut table);
    for entry in entries {
        let description = match &entry.description {
            Some(description) => Cell::new(description),
            None => dim_cell("-"),
        };
        table.add_row(vec![Cell::new(&entry.code), description]);
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(14)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::UpperBoundary(Width::Percentage(60)),
        ]);
    }
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

fn report_cell(outcome: &ReportOutcome) -> Cell {
    if outcome.succeeded() {
        Cell::new(outcome.kind)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(outcome.kind)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}

fn count_cell(outcome: &ReportOutcome) -> Cell {
    if !outcome.succeeded() {
        dim_cell("-")
    } else if outcome.rows == 0 {
        Cell::new(0).fg(Color::Yellow)
    } else {
        Cell::new(outcome.rows)
    }
}

fn destination_cell(outcome: &ReportOutcome) -> Cell {
    match (&outcome.destination, &outcome.error) {
        (Some(destination), _) => Cell::new(destination),
        (None, Some(_)) => Cell::new("FAILED").fg(Color::Red),
        (None, None) => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
