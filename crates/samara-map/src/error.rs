//! Error types for mapping operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the hosted-model transport and reply parsing.
///
/// These never escape [`crate::LlmMatcher`]; they end up as suggestion text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LlmError {
    /// No API key configured.
    #[error("no API key configured")]
    MissingApiKey,

    /// Network request failed.
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status.
    #[error("model endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The reply had no choices or empty content.
    #[error("model returned an empty reply")]
    EmptyResponse,

    /// The reply did not contain a fenced code block.
    #[error("model reply did not contain a fenced JSON block")]
    MissingCodeBlock,

    /// The fenced block was not a valid analysis.
    #[error("model reply was not a valid analysis: {0}")]
    InvalidJson(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

pub type LlmResult<T> = std::result::Result<T, LlmError>;

/// Errors from storing and loading analyses.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read analysis {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write analysis {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse analysis {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize analysis: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The stored analysis was made for sheets with different headers.
    #[error("stored analysis does not match the {side} sheet headers")]
    StaleAnalysis { side: &'static str },
}

pub type Result<T> = std::result::Result<T, MapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_code() {
        let err = LlmError::Status {
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "model endpoint returned HTTP 401: unauthorized"
        );
    }

    #[test]
    fn stale_analysis_names_side() {
        let err = MapError::StaleAnalysis { side: "right" };
        assert!(err.to_string().contains("right sheet"));
    }
}
