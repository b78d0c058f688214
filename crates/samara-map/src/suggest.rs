//! Review hints attached to an analysis.

use samara_model::ColumnMapping;

use crate::engine::REVIEW_THRESHOLD;

/// Builds the suggestion list for a finished analysis.
///
/// Nothing here rejects a mapping: low-confidence matches are only counted
/// so a user can review them before merging.
pub fn build_suggestions(
    mappings: &[ColumnMapping],
    unmatched_left: &[String],
    unmatched_right: &[String],
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if mappings.is_empty() {
        suggestions
            .push("No matching columns found; manual mapping may be needed.".to_string());
    }

    let low = mappings
        .iter()
        .filter(|m| m.confidence < REVIEW_THRESHOLD)
        .count();
    if low > 0 {
        suggestions.push(format!(
            "{low} {} below {:.0}% confidence; review before merging.",
            plural(low, "match", "matches"),
            REVIEW_THRESHOLD * 100.0
        ));
    }

    if !unmatched_left.is_empty() {
        suggestions.push(format!(
            "{} left {} without a match will be kept as-is: {}.",
            unmatched_left.len(),
            plural(unmatched_left.len(), "column", "columns"),
            unmatched_left.join(", ")
        ));
    }
    if !unmatched_right.is_empty() {
        suggestions.push(format!(
            "{} right {} without a match will be appended: {}.",
            unmatched_right.len(),
            plural(unmatched_right.len(), "column", "columns"),
            unmatched_right.join(", ")
        ));
    }

    suggestions
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
