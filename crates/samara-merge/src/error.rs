use thiserror::Error;

/// Errors raised while merging two sheets.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    /// A mapping names a header that the sheet does not have (or has fewer
    /// times than the analysis uses it).
    #[error("{side} sheet has no column '{column}' for mapping")]
    UnknownColumn { side: &'static str, column: String },

    #[error("join key '{0}' is not a mapped left column")]
    UnknownKeyColumn(String),
}

pub type Result<T> = std::result::Result<T, MergeError>;
