//! Column mapping between two sheets.
//!
//! Given the header rows of a left (source) and right (target) sheet, this
//! crate decides which columns hold the same data:
//!
//! - [`HeuristicMatcher`]: exact match, then normalized edit-distance
//!   similarity, then a fixed synonym table, assigned greedily in source order.
//! - [`LlmMatcher`]: delegates the decision to a hosted chat model and falls
//!   back to "nothing matched" on any failure.
//!
//! Both implement [`ColumnMatcher`]; [`matcher_from_settings`] picks one.
//!
//! # Example
//!
//! ```
//! use samara_map::{AnalysisRequest, ColumnMatcher, HeuristicMatcher};
//! use samara_model::MergeStrategy;
//!
//! let left = vec!["Name".to_string(), "Email".to_string(), "Amount".to_string()];
//! let right = vec!["Full Name".to_string(), "Email".to_string(), "Cost".to_string()];
//! let analysis = HeuristicMatcher::new().analyze(&AnalysisRequest::headers(&left, &right));
//!
//! assert_eq!(analysis.mappings.len(), 3);
//! assert_eq!(analysis.merge_strategy, MergeStrategy::Inner);
//! ```

#![deny(unsafe_code)]

pub mod engine;
pub mod error;
pub mod llm;
pub mod matcher;
pub mod patterns;
pub mod repository;
pub mod similarity;
pub mod strategy;
pub mod suggest;

pub use engine::{
    CONFIDENCE_FLOOR, EXACT_CONFIDENCE, HeuristicMatcher, MatchRule, PATTERN_CONFIDENCE,
    REVIEW_THRESHOLD, SIMILARITY_CONFIDENCE, SIMILARITY_THRESHOLD, score_pair,
};
pub use error::{LlmError, LlmResult, MapError, Result};
pub use llm::{CompletionClient, HttpCompletionClient, LlmMatcher, LlmSettings};
pub use matcher::{AnalysisRequest, ColumnMatcher, matcher_from_settings};
pub use patterns::{matches_pattern, pattern_group};
pub use repository::{StoredAnalysis, header_fingerprint, load_analysis, save_analysis};
pub use similarity::similarity;
pub use strategy::select_strategy;
pub use suggest::build_suggestions;
