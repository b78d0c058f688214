//! Hosted-model column matcher.
//!
//! The model receives both header lists and a few sample rows and must answer
//! with one fenced JSON block in the [`MergeAnalysis`] shape. Any failure along
//! the way (transport, HTTP status, missing block, bad JSON) degrades to an
//! analysis in which nothing matched, with the error text as a suggestion.

mod client;
mod config;
mod prompt;
mod response;

pub use client::{CompletionClient, HttpCompletionClient};
pub use config::{
    DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_SAMPLE_ROWS, DEFAULT_TIMEOUT_SECS, LlmSettings,
};
pub use prompt::{ChatMessage, ChatRequest, build_chat_request};
pub use response::{extract_code_block, parse_analysis, reconcile};

use samara_model::MergeAnalysis;

use crate::matcher::{AnalysisRequest, ColumnMatcher};
use crate::strategy::select_strategy;

/// Column matcher backed by a chat-completion model.
#[derive(Debug, Clone)]
pub struct LlmMatcher<C> {
    client: C,
    sample_rows: usize,
}

impl<C: CompletionClient> LlmMatcher<C> {
    pub fn new(client: C, sample_rows: usize) -> Self {
        Self {
            client,
            sample_rows,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C: CompletionClient> ColumnMatcher for LlmMatcher<C> {
    fn name(&self) -> &'static str {
        "llm"
    }

    fn analyze(&self, request: &AnalysisRequest<'_>) -> MergeAnalysis {
        let chat = build_chat_request(request, self.sample_rows);
        let outcome = self
            .client
            .complete(&chat)
            .and_then(|reply| parse_analysis(&reply));

        match outcome {
            Ok(analysis) => reconcile(analysis, request.source_headers, request.target_headers),
            Err(error) => {
                tracing::warn!(%error, "model analysis failed, reporting all columns unmatched");
                let mut analysis = MergeAnalysis::unmatched(
                    request.source_headers,
                    request.target_headers,
                    format!("AI analysis failed: {error}"),
                );
                analysis.merge_strategy = select_strategy(
                    0,
                    request.source_headers.len(),
                    request.target_headers.len(),
                );
                analysis
            }
        }
    }
}
