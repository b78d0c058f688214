//! Error types for reading and writing sheets.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing sheets.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extension is not one of the supported sheet formats.
    #[error("unsupported file type '{extension}' for {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    // === Parsing Errors ===
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to open workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    #[error("sheet '{sheet}' not found in {path} (available: {available})")]
    SheetNotFound {
        path: PathBuf,
        sheet: String,
        available: String,
    },

    /// No header row, or a header row with nothing in it.
    #[error("sheet is empty: {path}")]
    EmptySheet { path: PathBuf },

    // === Output Errors ===
    #[error("{rows} rows x {columns} columns does not fit in a worksheet")]
    TooLarge { rows: usize, columns: usize },

    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },
}

impl IngestError {
    /// Maps an I/O error on `path`, keeping "not found" distinct.
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::UnsupportedFormat {
            path: PathBuf::from("/data/report.pdf"),
            extension: "pdf".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported file type 'pdf' for /data/report.pdf"
        );
    }

    #[test]
    fn test_not_found_is_kept_apart() {
        let path = std::path::Path::new("missing.csv");
        let err = IngestError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, IngestError::FileNotFound { .. }));

        let err = IngestError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"),
        );
        assert!(matches!(err, IngestError::FileRead { .. }));
    }
}
