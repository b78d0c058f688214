use std::fmt::Write as _;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use samara_map::REVIEW_THRESHOLD;
use samara_model::{CellConflict, MergeAnalysis};

use crate::types::{AnalysisReport, MergeReport, SheetInfo};

pub fn print_analysis(report: &AnalysisReport) {
    println!("{}", sheet_line("Left", &report.left));
    println!("{}", sheet_line("Right", &report.right));
    println!(
        "Matcher: {}  Strategy: {} ({})",
        report.matcher,
        report.analysis.merge_strategy,
        report.analysis.merge_strategy.description()
    );
    if !report.analysis.mappings.is_empty() {
        println!("{}", mapping_table(&report.analysis));
    }
    if let Some(table) = unmatched_table(&report.analysis) {
        println!("{table}");
    }
    let suggestions = suggestion_lines(&report.analysis);
    if !suggestions.is_empty() {
        println!("Suggestions:\n{suggestions}");
    }
}

pub fn print_merge(report: &MergeReport) {
    print_analysis(&report.analysis);
    println!("{}", merge_summary(report));
}

pub fn print_conflicts(conflicts: &[CellConflict], limit: usize) {
    if conflicts.is_empty() {
        println!("No conflicting cells.");
        return;
    }
    println!("{}", conflict_table(conflicts, limit));
    if conflicts.len() > limit {
        println!("... {} more not shown", conflicts.len() - limit);
    }
}

pub fn sheet_line(label: &str, sheet: &SheetInfo) -> String {
    format!(
        "{label}: {} [{}] {} rows x {} columns",
        sheet.path.display(),
        sheet.name,
        sheet.rows,
        sheet.columns
    )
}

/// One row per committed pair; low-confidence pairs in yellow.
pub fn mapping_table(analysis: &MergeAnalysis) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Left column"),
        header_cell("Right column"),
        header_cell("Confidence"),
        header_cell("Reasoning"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for mapping in &analysis.mappings {
        let confidence = Cell::new(format!("{:.0}%", mapping.confidence * 100.0));
        let confidence = if mapping.confidence < REVIEW_THRESHOLD {
            confidence.fg(Color::Yellow)
        } else {
            confidence.fg(Color::Green)
        };
        table.add_row(vec![
            Cell::new(&mapping.source_column),
            Cell::new(&mapping.target_column),
            confidence,
            Cell::new(&mapping.reasoning),
        ]);
    }
    table
}

/// Side-by-side list of columns without a partner, if there are any.
pub fn unmatched_table(analysis: &MergeAnalysis) -> Option<Table> {
    let (left, right) = (&analysis.unmatched_left, &analysis.unmatched_right);
    if left.is_empty() && right.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Unmatched left"),
        header_cell("Unmatched right"),
    ]);
    apply_table_style(&mut table);
    for i in 0..left.len().max(right.len()) {
        table.add_row(vec![
            left.get(i).map_or_else(|| dim_cell("-"), Cell::new),
            right.get(i).map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    Some(table)
}

pub fn suggestion_lines(analysis: &MergeAnalysis) -> String {
    let mut out = String::new();
    for suggestion in &analysis.suggestions {
        let _ = writeln!(out, "- {suggestion}");
    }
    out.trim_end().to_string()
}

pub fn merge_summary(report: &MergeReport) -> String {
    let result = &report.result;
    let mut out = format!(
        "Merged {} rows x {} columns ({} mapped, {} conflicting cells)",
        result.row_count(),
        result.column_count(),
        report.analysis.analysis.mappings.len(),
        result.conflicts.len()
    );
    if let Some(path) = &report.output {
        let _ = write!(out, "\nOutput: {}", path.display());
    }
    out
}

pub fn conflict_table(conflicts: &[CellConflict], limit: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Column"),
        header_cell("Left"),
        header_cell("Right"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for conflict in conflicts.iter().take(limit) {
        table.add_row(vec![
            // Spreadsheet row number: 1-based, after the header row.
            Cell::new(conflict.row + 2),
            Cell::new(&conflict.column),
            Cell::new(&conflict.left).fg(Color::Cyan),
            Cell::new(&conflict.right).fg(Color::Magenta),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
