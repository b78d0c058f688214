//! The column-matching seam.
//!
//! A matcher turns two header lists (plus a few sample rows) into a
//! [`MergeAnalysis`]. The local heuristic and the hosted model both sit behind
//! [`ColumnMatcher`], chosen from settings at startup.

use samara_model::{CellValue, MergeAnalysis, Sheet};

use crate::engine::HeuristicMatcher;
use crate::llm::{HttpCompletionClient, LlmMatcher, LlmSettings};

/// Inputs for one analysis.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisRequest<'a> {
    pub source_headers: &'a [String],
    pub target_headers: &'a [String],
    pub source_sample: &'a [Vec<CellValue>],
    pub target_sample: &'a [Vec<CellValue>],
}

impl<'a> AnalysisRequest<'a> {
    /// A request with headers only and no sample rows.
    pub fn headers(source_headers: &'a [String], target_headers: &'a [String]) -> Self {
        Self {
            source_headers,
            target_headers,
            source_sample: &[],
            target_sample: &[],
        }
    }

    /// A request for two sheets carrying up to `sample_rows` rows each.
    pub fn from_sheets(source: &'a Sheet, target: &'a Sheet, sample_rows: usize) -> Self {
        Self {
            source_headers: &source.headers,
            target_headers: &target.headers,
            source_sample: source.sample(sample_rows),
            target_sample: target.sample(sample_rows),
        }
    }
}

/// Produces a column mapping for two sheets.
///
/// Implementations never fail: problems are reported inside the returned
/// analysis as suggestions.
pub trait ColumnMatcher {
    /// Short identifier recorded with stored analyses.
    fn name(&self) -> &'static str;

    fn analyze(&self, request: &AnalysisRequest<'_>) -> MergeAnalysis;
}

/// Picks the hosted model when it is enabled and has an API key, the local
/// heuristic otherwise.
///
/// A client that cannot be constructed falls back to the heuristic with a
/// warning.
pub fn matcher_from_settings(settings: &LlmSettings) -> Box<dyn ColumnMatcher> {
    if !settings.is_configured() {
        tracing::debug!("hosted model not configured, using heuristic matcher");
        return Box::new(HeuristicMatcher::new());
    }
    match HttpCompletionClient::new(settings) {
        Ok(client) => {
            tracing::debug!(model = %settings.model, "using hosted model matcher");
            Box::new(LlmMatcher::new(client, settings.sample_rows))
        }
        Err(error) => {
            tracing::warn!(%error, "could not build model client, using heuristic matcher");
            Box::new(HeuristicMatcher::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_settings_select_heuristic() {
        let settings = LlmSettings::default();
        assert_eq!(matcher_from_settings(&settings).name(), "heuristic");
    }

    #[test]
    fn disabled_settings_select_heuristic_even_with_key() {
        let settings = LlmSettings {
            enabled: false,
            api_key: Some("sk-test".to_string()),
            ..LlmSettings::default()
        };
        assert_eq!(matcher_from_settings(&settings).name(), "heuristic");
    }

    #[test]
    fn configured_settings_select_model() {
        let settings = LlmSettings {
            enabled: true,
            api_key: Some("sk-test".to_string()),
            ..LlmSettings::default()
        };
        assert_eq!(matcher_from_settings(&settings).name(), "llm");
    }

    #[test]
    fn request_from_sheets_caps_samples() {
        let source = Sheet::from_strings("l", &["A"], &[&["1"], &["2"], &["3"], &["4"]]);
        let target = Sheet::from_strings("r", &["B"], &[&["x"]]);
        let request = AnalysisRequest::from_sheets(&source, &target, 3);
        assert_eq!(request.source_sample.len(), 3);
        assert_eq!(request.target_sample.len(), 1);
    }
}
