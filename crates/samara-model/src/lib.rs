//! Shared types: sheets and cells, column mappings, merge analyses, and merge
//! results.

#![deny(unsafe_code)]

pub mod error;
pub mod mapping;
pub mod merge;
pub mod table;

pub use error::{ModelError, Result};
pub use mapping::{ColumnMapping, MergeAnalysis, MergeStrategy};
pub use merge::{CellConflict, MergeResult};
pub use table::{CellValue, Sheet};
