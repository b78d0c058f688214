//! Sheet input and output.
//!
//! Reads a single worksheet from CSV, XLSX, XLSM, XLS, XLSB, or ODS files into
//! a [`Sheet`](samara_model::Sheet), and writes a
//! [`MergeResult`](samara_model::MergeResult) back out as CSV or XLSX.

#![deny(unsafe_code)]

mod error;
mod format;
mod read;
mod write;

pub use error::{IngestError, Result};
pub use format::SheetFormat;
pub use read::{list_sheets, read_sheet};
pub use write::write_result;
