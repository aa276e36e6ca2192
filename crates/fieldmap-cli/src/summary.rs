use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use fieldmap_map::{CatalogMatch, ConfidenceLevel, ConfidenceThresholds, SessionReport};
use fieldmap_model::{CanonicalField, HistoricalMapping, MatchMethod, Suggestion};

pub fn print_suggestions(report: &SessionReport, thresholds: &ConfidenceThresholds) {
    println!("{}", suggestion_table(report, thresholds));
    print_session_summary(report, thresholds);
}

fn suggestion_table(report: &SessionReport, thresholds: &ConfidenceThresholds) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Target"),
        header_cell("Confidence"),
        header_cell("Level"),
        header_cell("Methods"),
        header_cell("Reason"),
    ]);
    apply_suggestion_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);

    for result in &report.results {
        if result.is_unmappable() {
            table.add_row(vec![
                Cell::new(&result.field.raw_name).add_attribute(Attribute::Bold),
                Cell::new("no suggestion").fg(Color::Yellow),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
            ]);
            continue;
        }
        for (rank, suggestion) in result.ranked_suggestions.iter().enumerate() {
            let field_cell = if rank == 0 {
                Cell::new(&result.field.raw_name).add_attribute(Attribute::Bold)
            } else {
                Cell::new("")
            };
            let target_cell = if rank == 0 {
                Cell::new(&suggestion.target).fg(Color::Green)
            } else {
                Cell::new(&suggestion.target)
            };
            table.add_row(vec![
                field_cell,
                target_cell,
                Cell::new(format!("{:.2}", suggestion.confidence)),
                level_cell(thresholds.categorize(suggestion.confidence)),
                methods_cell(suggestion),
                Cell::new(suggestion.reason()),
            ]);
        }
    }
    table
}

fn print_session_summary(report: &SessionReport, thresholds: &ConfidenceThresholds) {
    let summary = &report.summary;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Fields"), Cell::new(summary.total_fields)]);
    table.add_row(vec![
        Cell::new("Already mapped"),
        count_cell(summary.already_mapped_count, Color::DarkGrey),
    ]);
    table.add_row(vec![
        Cell::new("With suggestions"),
        count_cell(summary.newly_suggested_count, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Unmappable"),
        count_cell(report.unmappable().count(), Color::Yellow),
    ]);
    let levels = report.count_by_level_with(thresholds);
    for level in [
        ConfidenceLevel::High,
        ConfidenceLevel::Medium,
        ConfidenceLevel::Low,
    ] {
        let count = levels.get(&level).copied().unwrap_or(0);
        table.add_row(vec![
            Cell::new(format!("Top suggestion {level}")),
            count_cell(count, level_color(level)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Mean top confidence"),
        report
            .mean_confidence()
            .map_or_else(|| dim_cell("-"), |mean| Cell::new(format!("{mean:.2}"))),
    ]);
    table.add_row(vec![
        Cell::new("Minimum confidence"),
        Cell::new(format!("{:.2}", summary.confidence_threshold_used)),
    ]);
    println!("{table}");
}

pub fn print_catalog<'a>(fields: impl IntoIterator<Item = &'a CanonicalField>) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Key"),
        header_cell("Category"),
        header_cell("Label"),
        header_cell("Type"),
    ]);
    apply_table_style(&mut table);
    for field in fields {
        table.add_row(vec![
            Cell::new(&field.key),
            Cell::new(field.category.as_str()),
            Cell::new(&field.label),
            dim_cell(field.value_type.as_str()),
        ]);
    }
    println!("{table}");
}

pub fn print_search(query: &str, matches: &[CatalogMatch]) {
    if matches.is_empty() {
        println!("No catalog fields match '{query}'.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Key"),
        header_cell("Label"),
        header_cell("Score"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for found in matches {
        table.add_row(vec![
            Cell::new(&found.key),
            Cell::new(&found.label),
            Cell::new(format!("{:.2}", found.score)),
        ]);
    }
    println!("{table}");
}

pub fn print_recorded(mappings: &[HistoricalMapping], path: &Path) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Target"),
        header_cell("Confidence"),
        header_cell("Accepted at"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for mapping in mappings {
        table.add_row(vec![
            Cell::new(&mapping.raw_name),
            Cell::new(&mapping.target).fg(Color::Green),
            Cell::new(format!("{:.2}", mapping.accepted_confidence)),
            dim_cell(mapping.accepted_at.to_rfc3339()),
        ]);
    }
    println!("{table}");
    println!("History: {}", path.display());
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_suggestion_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::UpperBoundary(Width::Fixed(24)),
            ColumnConstraint::UpperBoundary(Width::Percentage(40)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn level_cell(level: Option<ConfidenceLevel>) -> Cell {
    match level {
        Some(level) => Cell::new(level.as_str()).fg(level_color(level)),
        None => dim_cell("-"),
    }
}

fn level_color(level: ConfidenceLevel) -> Color {
    match level {
        ConfidenceLevel::High => Color::Green,
        ConfidenceLevel::Medium => Color::Yellow,
        ConfidenceLevel::Low => Color::Red,
    }
}

fn methods_cell(suggestion: &Suggestion) -> Cell {
    let methods: Vec<&str> = suggestion.methods.iter().map(MatchMethod::as_str).collect();
    if methods.is_empty() {
        dim_cell("manual")
    } else {
        Cell::new(methods.join(", "))
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(color)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use fieldmap_map::{MappingEngine, MappingSession};
    use fieldmap_model::{DocumentField, ManufacturerId, TemplateId};
    use fieldmap_standards::MatchingStandards;

    use super::*;

    #[test]
    fn suggestion_table_lists_unmappable_fields() {
        let standards = MatchingStandards::embedded().expect("standards");
        let engine = MappingEngine::new(standards);
        let fields = vec![
            DocumentField::new("Patient DOB", "", "ivr", TemplateId::new("t")),
            DocumentField::new("bday", "", "ivr", TemplateId::new("t")),
        ];
        let report = MappingSession::new(&engine, "ivr").run(&fields, &ManufacturerId::new("ACME"), &[]);

        let rendered = suggestion_table(&report, &ConfidenceThresholds::default()).to_string();
        assert!(rendered.contains("patient_dob"));
        assert!(rendered.contains("no suggestion"));
    }
}
