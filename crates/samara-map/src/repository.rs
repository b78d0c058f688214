//! Saving and loading reviewed analyses.
//!
//! An analysis can be written to disk, edited by hand (for example to drop a
//! doubtful pattern match), and fed back into a merge. Each stored analysis
//! carries a fingerprint of both header rows so it is not silently applied to
//! sheets it was not made for.
//!
//! # Storage Format
//!
//! Pretty-printed JSON:
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "savedAt": "2026-01-05T10:00:00Z",
//!   "matcher": "heuristic",
//!   "sourceFingerprint": "…",
//!   "targetFingerprint": "…",
//!   "analysis": { "mappings": [], "unmatchedLeft": [], … }
//! }
//! ```

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use samara_model::MergeAnalysis;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{MapError, Result};

const FORMAT_VERSION: &str = "1.0";

fn default_version() -> String {
    FORMAT_VERSION.to_string()
}

/// An analysis plus the metadata needed to reuse it safely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAnalysis {
    #[serde(default = "default_version")]
    pub version: String,
    pub saved_at: Option<DateTime<Utc>>,
    /// Matcher that produced the analysis (`heuristic`, `llm`, …).
    pub matcher: String,
    pub source_fingerprint: String,
    pub target_fingerprint: String,
    pub analysis: MergeAnalysis,
}

impl StoredAnalysis {
    pub fn new(
        analysis: MergeAnalysis,
        matcher: &str,
        source_headers: &[String],
        target_headers: &[String],
    ) -> Self {
        Self {
            version: default_version(),
            saved_at: Some(Utc::now()),
            matcher: matcher.to_string(),
            source_fingerprint: header_fingerprint(source_headers),
            target_fingerprint: header_fingerprint(target_headers),
            analysis,
        }
    }

    /// Checks that the stored analysis was made for these header rows.
    pub fn verify(&self, source_headers: &[String], target_headers: &[String]) -> Result<()> {
        if self.source_fingerprint != header_fingerprint(source_headers) {
            return Err(MapError::StaleAnalysis { side: "left" });
        }
        if self.target_fingerprint != header_fingerprint(target_headers) {
            return Err(MapError::StaleAnalysis { side: "right" });
        }
        Ok(())
    }
}

/// SHA-256 (hex) of an ordered header row.
///
/// Headers are length-prefixed so `["ab", "c"]` and `["a", "bc"]` differ.
pub fn header_fingerprint(headers: &[String]) -> String {
    let mut hasher = Sha256::new();
    for header in headers {
        hasher.update((header.len() as u64).to_le_bytes());
        hasher.update(header.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Writes a stored analysis as pretty JSON, creating parent directories.
pub fn save_analysis(path: &Path, stored: &StoredAnalysis) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| MapError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(stored)?;
    fs::write(path, json).map_err(|source| MapError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "saved analysis");
    Ok(())
}

/// Reads a stored analysis.
pub fn load_analysis(path: &Path) -> Result<StoredAnalysis> {
    let contents = fs::read_to_string(path).map_err(|source| MapError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| MapError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn fingerprint_is_order_sensitive() {
        assert_ne!(
            header_fingerprint(&strings(&["a", "b"])),
            header_fingerprint(&strings(&["b", "a"]))
        );
    }

    #[test]
    fn fingerprint_separates_boundaries() {
        assert_ne!(
            header_fingerprint(&strings(&["ab", "c"])),
            header_fingerprint(&strings(&["a", "bc"]))
        );
    }

    #[test]
    fn fingerprint_is_hex_sha256() {
        let fp = header_fingerprint(&[]);
        assert_eq!(fp.len(), 64);
        // Empty input hashes to the well-known empty SHA-256.
        assert_eq!(
            fp,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
