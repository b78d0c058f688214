use std::fmt;
use std::path::Path;

use crate::error::{IngestError, Result};

/// Sheet file formats, told apart by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Xlsx,
    Xlsm,
    Xls,
    Xlsb,
    Ods,
}

impl SheetFormat {
    /// Detects the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            "xlsm" => Ok(Self::Xlsm),
            "xls" => Ok(Self::Xls),
            "xlsb" => Ok(Self::Xlsb),
            "ods" => Ok(Self::Ods),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }

    /// True for everything read through a workbook reader.
    pub fn is_workbook(self) -> bool {
        !matches!(self, Self::Csv)
    }

    /// Formats a merged result can be written as.
    pub fn is_writable(self) -> bool {
        matches!(self, Self::Csv | Self::Xlsx)
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Xlsm => "xlsm",
            Self::Xls => "xls",
            Self::Xlsb => "xlsb",
            Self::Ods => "ods",
        }
    }
}

impl fmt::Display for SheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_known_extensions() {
        assert_eq!(
            SheetFormat::from_path(Path::new("a/b.CSV")).unwrap(),
            SheetFormat::Csv
        );
        assert_eq!(
            SheetFormat::from_path(Path::new("book.xlsx")).unwrap(),
            SheetFormat::Xlsx
        );
        assert!(SheetFormat::from_path(Path::new("book.ods")).unwrap().is_workbook());
        assert!(!SheetFormat::Xls.is_writable());
    }

    #[test]
    fn rejects_other_extensions() {
        let err = SheetFormat::from_path(Path::new("notes.txt")).unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedFormat { ref extension, .. } if extension == "txt"
        ));
        assert!(SheetFormat::from_path(Path::new("no_extension")).is_err());
    }
}
