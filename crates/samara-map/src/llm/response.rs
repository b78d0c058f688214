//! Parsing and sanity-checking model output.

use samara_model::{ColumnMapping, MergeAnalysis, MergeStrategy};
use serde::Deserialize;

use crate::engine::CONFIDENCE_FLOOR;
use crate::error::{LlmError, LlmResult};
use crate::similarity::normalize_header;
use crate::strategy::select_strategy;
use crate::suggest::build_suggestions;

/// Reply shape the model must produce.
///
/// Unlike [`MergeAnalysis`], `mappings` is required so that an arbitrary JSON
/// object does not pass as an empty analysis.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelReply {
    mappings: Vec<ColumnMapping>,
    #[serde(default)]
    unmatched_left: Vec<String>,
    #[serde(default)]
    unmatched_right: Vec<String>,
    #[serde(default)]
    suggestions: Vec<String>,
    #[serde(default)]
    merge_strategy: Option<MergeStrategy>,
}

impl From<ModelReply> for MergeAnalysis {
    fn from(reply: ModelReply) -> Self {
        Self {
            mappings: reply.mappings,
            unmatched_left: reply.unmatched_left,
            unmatched_right: reply.unmatched_right,
            suggestions: reply.suggestions,
            merge_strategy: reply.merge_strategy.unwrap_or_default(),
        }
    }
}

/// Returns the body of the first fenced code block in `text`.
///
/// Accepts both ```` ```json ```` and bare ```` ``` ```` fences. An unclosed
/// fence is not a block.
pub fn extract_code_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let rest = &text[start + 3..];
    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest);
    let end = rest.find("```")?;
    Some(rest[..end].trim())
}

/// Parses an assistant reply into a [`MergeAnalysis`].
///
/// The fenced block must be a JSON object with at least a `mappings` array;
/// anything else is [`LlmError::InvalidJson`].
pub fn parse_analysis(text: &str) -> LlmResult<MergeAnalysis> {
    let block = extract_code_block(text).ok_or(LlmError::MissingCodeBlock)?;
    serde_json::from_str::<ModelReply>(block)
        .map(MergeAnalysis::from)
        .map_err(|e| LlmError::InvalidJson(e.to_string()))
}

/// Makes a model-produced analysis consistent with the real headers.
///
/// Mappings that name an unknown header, reuse an already-mapped column, or
/// carry a confidence at or below the floor are dropped. Names are resolved
/// exactly first, then case/whitespace-insensitively, and rewritten to the
/// header as it appears in the sheet. The unmatched lists are rebuilt as the
/// complement of what survived and the strategy is recomputed from the
/// surviving mappings. The model's suggestions are kept, followed by the
/// usual review hints that are not already present.
pub fn reconcile(
    analysis: MergeAnalysis,
    source_headers: &[String],
    target_headers: &[String],
) -> MergeAnalysis {
    let mut source_used = vec![false; source_headers.len()];
    let mut target_used = vec![false; target_headers.len()];
    let mut mappings = Vec::new();
    let mut dropped = 0usize;

    for mapping in analysis.mappings {
        let confidence = mapping.confidence;
        if !confidence.is_finite() || confidence.clamp(0.0, 1.0) <= CONFIDENCE_FLOOR {
            dropped += 1;
            continue;
        }
        let source = resolve(&mapping.source_column, source_headers, &source_used);
        let target = resolve(&mapping.target_column, target_headers, &target_used);
        let (Some(source), Some(target)) = (source, target) else {
            tracing::debug!(
                source = %mapping.source_column,
                target = %mapping.target_column,
                "ignoring model mapping with unknown or reused column"
            );
            dropped += 1;
            continue;
        };
        source_used[source] = true;
        target_used[target] = true;
        mappings.push(ColumnMapping {
            source_column: source_headers[source].clone(),
            target_column: target_headers[target].clone(),
            confidence: confidence.clamp(0.0, 1.0),
            reasoning: mapping.reasoning,
        });
    }

    let unmatched_left = complement(source_headers, &source_used);
    let unmatched_right = complement(target_headers, &target_used);
    let merge_strategy = select_strategy(
        mappings.len(),
        source_headers.len(),
        target_headers.len(),
    );
    if merge_strategy != analysis.merge_strategy {
        tracing::debug!(
            model = %analysis.merge_strategy,
            derived = %merge_strategy,
            "replacing model merge strategy"
        );
    }

    let mut suggestions = analysis.suggestions;
    if dropped > 0 {
        suggestions.push(format!(
            "{dropped} mapping(s) from the model were ignored because they named unknown or \
             already-mapped columns or had too little confidence."
        ));
    }
    for hint in build_suggestions(&mappings, &unmatched_left, &unmatched_right) {
        if !suggestions.contains(&hint) {
            suggestions.push(hint);
        }
    }

    MergeAnalysis {
        mappings,
        unmatched_left,
        unmatched_right,
        suggestions,
        merge_strategy,
    }
}

fn resolve(name: &str, headers: &[String], used: &[bool]) -> Option<usize> {
    let free = |index: &usize| !used[*index];
    (0..headers.len())
        .filter(free)
        .find(|&i| headers[i] == name)
        .or_else(|| {
            let wanted = normalize_header(name);
            (0..headers.len())
                .filter(free)
                .find(|&i| normalize_header(&headers[i]) == wanted)
        })
}

fn complement(headers: &[String], used: &[bool]) -> Vec<String> {
    headers
        .iter()
        .zip(used)
        .filter(|(_, used)| !**used)
        .map(|(header, _)| header.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_json_fence() {
        let text = "Here you go:\n```json\n{\"a\": 1}\n```\nThanks";
        assert_eq!(extract_code_block(text), Some("{\"a\": 1}"));
    }

    #[test]
    fn extracts_bare_fence() {
        assert_eq!(extract_code_block("```\n[]\n```"), Some("[]"));
    }

    #[test]
    fn unclosed_fence_is_rejected() {
        assert_eq!(extract_code_block("```json\n{}"), None);
        assert_eq!(extract_code_block("{}"), None);
    }

    #[test]
    fn parse_reports_missing_block() {
        assert!(matches!(
            parse_analysis("{\"mappings\": []}"),
            Err(LlmError::MissingCodeBlock)
        ));
    }

    #[test]
    fn parse_requires_mappings() {
        for reply in ["```json\n{}\n```", "```json\n{\"answer\": \"nope\"}\n```"] {
            assert!(matches!(
                parse_analysis(reply),
                Err(LlmError::InvalidJson(_))
            ));
        }
        let parsed = parse_analysis("```json\n{\"mappings\": []}\n```").unwrap();
        assert!(parsed.mappings.is_empty());
    }

    #[test]
    fn reconcile_derives_strategy_from_surviving_mappings() {
        let left = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let right = vec!["D".to_string()];
        let analysis = MergeAnalysis {
            merge_strategy: MergeStrategy::Inner,
            ..MergeAnalysis::default()
        };
        let reconciled = reconcile(analysis, &left, &right);
        assert_eq!(reconciled.merge_strategy, MergeStrategy::Left);
        assert_eq!(
            reconciled.suggestions[0],
            "No matching columns found; manual mapping may be needed."
        );
    }

    #[test]
    fn parse_reports_bad_json() {
        assert!(matches!(
            parse_analysis("```json\n{not json}\n```"),
            Err(LlmError::InvalidJson(_))
        ));
    }
}
