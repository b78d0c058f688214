use std::path::{Path, PathBuf};

use samara_model::{MergeAnalysis, MergeResult, Sheet};
use serde::Serialize;

/// What was read from one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetInfo {
    pub path: PathBuf,
    pub name: String,
    pub rows: usize,
    pub columns: usize,
}

impl SheetInfo {
    pub fn new(path: &Path, sheet: &Sheet) -> Self {
        Self {
            path: path.to_path_buf(),
            name: sheet.name.clone(),
            rows: sheet.row_count(),
            columns: sheet.column_count(),
        }
    }
}

/// Outcome of `analyze`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub left: SheetInfo,
    pub right: SheetInfo,
    pub matcher: String,
    pub analysis: MergeAnalysis,
}

/// Outcome of `merge` and `compare`.
#[derive(Debug, Clone)]
pub struct MergeReport {
    pub analysis: AnalysisReport,
    pub result: MergeResult,
    /// `None` when nothing was written.
    pub output: Option<PathBuf>,
}
