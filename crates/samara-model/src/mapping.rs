//! Column mapping and merge analysis types.
//!
//! These are the shapes produced by a column matcher and consumed by the row
//! merger. The wire format (camelCase JSON) is also what the hosted model is
//! asked to return, so field names here are part of that contract.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A single committed source-to-target column pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    /// Header from the source (left) sheet.
    #[serde(alias = "leftColumn")]
    pub source_column: String,
    /// Header from the target (right) sheet.
    #[serde(alias = "rightColumn")]
    pub target_column: String,
    /// Rule-tier confidence in `[0, 1]`.
    pub confidence: f32,
    /// Human-readable justification.
    #[serde(default)]
    pub reasoning: String,
}

/// Advisory classification of the overall merge.
///
/// The label describes the data shape only. Rows are always combined the
/// same way regardless of which variant is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    Inner,
    Left,
    Right,
    #[default]
    Outer,
}

impl MergeStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "inner",
            Self::Left => "left",
            Self::Right => "right",
            Self::Outer => "outer",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Inner => "most columns line up between both sheets",
            Self::Left => "the left sheet carries extra columns",
            Self::Right => "the right sheet carries extra columns",
            Self::Outer => "both sheets carry columns the other lacks",
        }
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeStrategy {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inner" => Ok(Self::Inner),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "outer" => Ok(Self::Outer),
            other => Err(ModelError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Output of a column matcher for one pair of sheets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MergeAnalysis {
    pub mappings: Vec<ColumnMapping>,
    pub unmatched_left: Vec<String>,
    pub unmatched_right: Vec<String>,
    pub suggestions: Vec<String>,
    pub merge_strategy: MergeStrategy,
}

impl MergeAnalysis {
    /// An analysis in which nothing matched.
    ///
    /// Used when a matcher cannot produce a result: every header is reported
    /// as unmatched and `suggestion` explains why.
    pub fn unmatched(
        source_headers: &[String],
        target_headers: &[String],
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            mappings: Vec::new(),
            unmatched_left: source_headers.to_vec(),
            unmatched_right: target_headers.to_vec(),
            suggestions: vec![suggestion.into()],
            merge_strategy: MergeStrategy::default(),
        }
    }

    pub fn mapping_for_source(&self, source: &str) -> Option<&ColumnMapping> {
        self.mappings.iter().find(|m| m.source_column == source)
    }

    pub fn mapping_for_target(&self, target: &str) -> Option<&ColumnMapping> {
        self.mappings.iter().find(|m| m.target_column == target)
    }

    /// Mappings with confidence strictly below `threshold`.
    pub fn below_confidence(&self, threshold: f32) -> impl Iterator<Item = &ColumnMapping> {
        self.mappings
            .iter()
            .filter(move |m| m.confidence < threshold)
    }

    pub fn is_fully_matched(&self) -> bool {
        self.unmatched_left.is_empty() && self.unmatched_right.is_empty()
    }
}
