//! Heuristic column mapper.
//!
//! Every source header is scored against the target headers that are still
//! free, using three fixed rule tiers:
//!
//! | Rule        | Condition                         | Confidence |
//! |-------------|-----------------------------------|------------|
//! | Exact       | normalized names are equal        | 1.0        |
//! | Similarity  | edit-distance similarity > 0.7    | 0.85       |
//! | Pattern     | both names in one synonym group   | 0.75       |
//!
//! The confidences are tier constants, not calibrated probabilities.
//! Assignment is greedy in source order: once a target is claimed it is gone
//! for every later source header, even one that would have matched it better.

use samara_model::{ColumnMapping, MergeAnalysis};

use crate::matcher::{AnalysisRequest, ColumnMatcher};
use crate::patterns::shared_group;
use crate::similarity::{normalize_header, similarity};
use crate::strategy::select_strategy;
use crate::suggest::build_suggestions;

pub const EXACT_CONFIDENCE: f32 = 1.0;
pub const SIMILARITY_CONFIDENCE: f32 = 0.85;
pub const PATTERN_CONFIDENCE: f32 = 0.75;
/// Similarity must be strictly above this for the similarity tier.
pub const SIMILARITY_THRESHOLD: f64 = 0.7;
/// A candidate is committed only when its confidence is strictly above this.
pub const CONFIDENCE_FLOOR: f32 = 0.6;
/// Matches below this confidence are flagged for review.
pub const REVIEW_THRESHOLD: f32 = 0.8;

/// Which rule tier produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    Exact,
    Similarity,
    Pattern,
}

impl MatchRule {
    pub fn confidence(&self) -> f32 {
        match self {
            Self::Exact => EXACT_CONFIDENCE,
            Self::Similarity => SIMILARITY_CONFIDENCE,
            Self::Pattern => PATTERN_CONFIDENCE,
        }
    }
}

/// A scored pairing of one source header with one target header.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub target_index: usize,
    pub rule: MatchRule,
    pub confidence: f32,
    pub reasoning: String,
}

/// Scores one normalized source name against one normalized target name.
///
/// Returns the highest tier that fires, or `None` when no rule applies.
pub fn score_pair(source: &str, target: &str) -> Option<(MatchRule, String)> {
    if source == target {
        return Some((MatchRule::Exact, "Exact match".to_string()));
    }
    let score = similarity(source, target);
    if score > SIMILARITY_THRESHOLD {
        return Some((
            MatchRule::Similarity,
            format!("High similarity ({:.0}%)", score * 100.0),
        ));
    }
    shared_group(source, target)
        .map(|group| (MatchRule::Pattern, format!("Common {group} pattern match")))
}

/// The local, deterministic column matcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicMatcher;

impl HeuristicMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Best candidate among the unclaimed targets for one source name.
    ///
    /// Ties keep the earliest target.
    fn best_candidate(
        source: &str,
        targets: &[String],
        claimed: &[bool],
    ) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for (index, target) in targets.iter().enumerate() {
            if claimed[index] {
                continue;
            }
            let Some((rule, reasoning)) = score_pair(source, target) else {
                continue;
            };
            let confidence = rule.confidence();
            if best.as_ref().is_none_or(|b| confidence > b.confidence) {
                best = Some(Candidate {
                    target_index: index,
                    rule,
                    confidence,
                    reasoning,
                });
            }
            if rule == MatchRule::Exact {
                break;
            }
        }
        best
    }
}

impl ColumnMatcher for HeuristicMatcher {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn analyze(&self, request: &AnalysisRequest<'_>) -> MergeAnalysis {
        let sources = request.source_headers;
        let targets = request.target_headers;
        let normalized_targets: Vec<String> =
            targets.iter().map(|t| normalize_header(t)).collect();

        let mut claimed = vec![false; targets.len()];
        let mut mappings = Vec::new();
        let mut unmatched_left = Vec::new();

        for source in sources {
            let normalized = normalize_header(source);
            match Self::best_candidate(&normalized, &normalized_targets, &claimed) {
                Some(candidate) if candidate.confidence > CONFIDENCE_FLOOR => {
                    claimed[candidate.target_index] = true;
                    let target = &targets[candidate.target_index];
                    tracing::debug!(
                        source = %source,
                        target = %target,
                        rule = ?candidate.rule,
                        confidence = candidate.confidence,
                        "mapped column"
                    );
                    mappings.push(ColumnMapping {
                        source_column: source.clone(),
                        target_column: target.clone(),
                        confidence: candidate.confidence,
                        reasoning: candidate.reasoning,
                    });
                }
                _ => {
                    tracing::debug!(source = %source, "no acceptable target");
                    unmatched_left.push(source.clone());
                }
            }
        }

        let unmatched_right: Vec<String> = targets
            .iter()
            .zip(&claimed)
            .filter(|(_, taken)| !**taken)
            .map(|(target, _)| target.clone())
            .collect();

        let merge_strategy = select_strategy(mappings.len(), sources.len(), targets.len());
        let suggestions = build_suggestions(&mappings, &unmatched_left, &unmatched_right);

        MergeAnalysis {
            mappings,
            unmatched_left,
            unmatched_right,
            suggestions,
            merge_strategy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn exact_beats_similarity() {
        assert_eq!(score_pair("email", "email").unwrap().0, MatchRule::Exact);
        assert_eq!(score_pair("email", "emails").unwrap().0, MatchRule::Similarity);
    }

    #[test]
    fn similarity_beats_pattern() {
        // "e-mail" and "email" share a group but are also 83% similar.
        let (rule, reasoning) = score_pair("e-mail", "email").unwrap();
        assert_eq!(rule, MatchRule::Similarity);
        assert_eq!(reasoning, "High similarity (83%)");
    }

    #[test]
    fn pattern_catches_low_similarity_aliases() {
        let (rule, reasoning) = score_pair("id", "identifier").unwrap();
        assert_eq!(rule, MatchRule::Pattern);
        assert_eq!(reasoning, "Common id pattern match");
    }

    #[test]
    fn unrelated_names_do_not_score() {
        assert!(score_pair("foo", "qux").is_none());
    }

    #[test]
    fn exact_match_is_case_and_whitespace_insensitive() {
        let source = strings(&["  EMAIL "]);
        let target = strings(&["Email"]);
        let analysis = HeuristicMatcher::new().analyze(&AnalysisRequest::headers(&source, &target));
        assert_eq!(analysis.mappings.len(), 1);
        assert_eq!(analysis.mappings[0].confidence, EXACT_CONFIDENCE);
        assert_eq!(analysis.mappings[0].source_column, "  EMAIL ");
        assert_eq!(analysis.mappings[0].target_column, "Email");
    }

    #[test]
    fn exact_match_wins_over_earlier_similar_target() {
        let source = strings(&["Status"]);
        let target = strings(&["Statuses", "Status"]);
        let analysis = HeuristicMatcher::new().analyze(&AnalysisRequest::headers(&source, &target));
        assert_eq!(analysis.mappings[0].target_column, "Status");
        assert_eq!(analysis.mappings[0].reasoning, "Exact match");
        assert_eq!(analysis.unmatched_right, strings(&["Statuses"]));
    }

    #[test]
    fn greedy_order_can_strand_a_better_match() {
        // "Price" claims "Cost" through the amount group before "Cost" is seen.
        let source = strings(&["Price", "Cost"]);
        let target = strings(&["Cost"]);
        let analysis = HeuristicMatcher::new().analyze(&AnalysisRequest::headers(&source, &target));
        assert_eq!(analysis.mappings.len(), 1);
        assert_eq!(analysis.mappings[0].source_column, "Price");
        assert_eq!(analysis.unmatched_left, strings(&["Cost"]));
    }

    #[test]
    fn duplicate_targets_are_claimed_by_position() {
        let source = strings(&["Id", "Id"]);
        let target = strings(&["id", "ID"]);
        let analysis = HeuristicMatcher::new().analyze(&AnalysisRequest::headers(&source, &target));
        assert_eq!(analysis.mappings.len(), 2);
        assert_eq!(analysis.mappings[0].target_column, "id");
        assert_eq!(analysis.mappings[1].target_column, "ID");
    }
}
