//! Row merger.
//!
//! Combines a left and a right [`Sheet`](samara_model::Sheet) into one
//! [`MergeResult`](samara_model::MergeResult), following the column pairs of a
//! [`MergeAnalysis`](samara_model::MergeAnalysis).
//!
//! Rows are paired by position unless [`RowAlignment::Key`] names a mapped
//! column to join on. The analysis' merge strategy label is carried along for
//! reporting only and never changes which rows are kept.
//!
//! # Example
//!
//! ```
//! use samara_merge::{MergeOptions, merge_rows};
//! use samara_model::{ColumnMapping, MergeAnalysis, Sheet};
//!
//! let left = Sheet::from_strings("left", &["Name", "City"], &[&["Ada", "London"]]);
//! let right = Sheet::from_strings("right", &["Full Name"], &[&["Ada L."]]);
//! let analysis = MergeAnalysis {
//!     mappings: vec![ColumnMapping {
//!         source_column: "Name".to_string(),
//!         target_column: "Full Name".to_string(),
//!         confidence: 0.75,
//!         reasoning: String::new(),
//!     }],
//!     ..MergeAnalysis::default()
//! };
//!
//! let merged = merge_rows(&left, &right, &analysis, &MergeOptions::default()).unwrap();
//! assert_eq!(merged.headers, ["Name", "City"]);
//! assert_eq!(merged.rows[0][0].to_string(), "Ada | Ada L.");
//! ```

#![deny(unsafe_code)]

mod error;
mod merger;
mod options;

pub use error::{MergeError, Result};
pub use merger::merge_rows;
pub use options::{DEFAULT_RIGHT_SUFFIX, DEFAULT_SEPARATOR, MergeOptions, RowAlignment};
