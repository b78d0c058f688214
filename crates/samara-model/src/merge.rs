use serde::{Deserialize, Serialize};

use crate::table::CellValue;

/// Two non-empty, differing values that were concatenated into one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellConflict {
    /// Output row index (0-based, excluding the header row).
    pub row: usize,
    /// Output column header.
    pub column: String,
    pub left: String,
    pub right: String,
}

/// A merged sheet ready to be written out.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MergeResult {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    pub conflicts: Vec<CellConflict>,
}

impl MergeResult {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}
