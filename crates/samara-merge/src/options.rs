use serde::{Deserialize, Serialize};

pub const DEFAULT_SEPARATOR: &str = " | ";
pub const DEFAULT_RIGHT_SUFFIX: &str = " (Right)";

/// How rows of the two sheets are paired up.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RowAlignment {
    /// Row `i` of the output draws row `i` of each sheet.
    #[default]
    Positional,
    /// Rows are paired on equal values of a mapped column, named by its left
    /// header.
    Key { column: String },
}

/// Knobs for [`merge_rows`](crate::merge_rows).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Placed between the left and right value when a mapped cell disagrees.
    pub separator: String,
    /// Appended to the headers of right columns that were not mapped.
    pub right_suffix: String,
    pub alignment: RowAlignment,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            right_suffix: DEFAULT_RIGHT_SUFFIX.to_string(),
            alignment: RowAlignment::Positional,
        }
    }
}

impl MergeOptions {
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_right_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.right_suffix = suffix.into();
        self
    }

    pub fn with_key(mut self, column: impl Into<String>) -> Self {
        self.alignment = RowAlignment::Key {
            column: column.into(),
        };
        self
    }
}
