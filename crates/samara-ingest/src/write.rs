//! Writing a merged result as CSV or XLSX.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use samara_model::{CellValue, MergeResult};

use crate::error::{IngestError, Result};
use crate::format::SheetFormat;

/// Worksheet limits (header row included).
const MAX_ROWS: usize = 1_048_576;
const MAX_COLUMNS: usize = 16_384;

/// Writes `result` to `path`; the extension picks CSV or XLSX.
///
/// XLSX output keeps cell types, puts the header in bold, and adds a
/// "Conflicts" worksheet when any mapped cell had two differing values.
pub fn write_result(path: &Path, result: &MergeResult) -> Result<()> {
    let format = SheetFormat::from_path(path)?;
    if !format.is_writable() {
        return Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension: format.extension().to_string(),
        });
    }

    match format {
        SheetFormat::Csv => write_csv(path, result)?,
        _ => write_xlsx(path, result)?,
    }
    tracing::info!(
        path = %path.display(),
        rows = result.row_count(),
        columns = result.column_count(),
        "wrote merged sheet"
    );
    Ok(())
}

fn write_csv(path: &Path, result: &MergeResult) -> Result<()> {
    let csv_error = |source: csv::Error| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;

    writer.write_record(&result.headers).map_err(csv_error)?;
    for row in &result.rows {
        writer
            .write_record(row.iter().map(ToString::to_string))
            .map_err(csv_error)?;
    }
    writer
        .flush()
        .map_err(|source| IngestError::io(path, source))
}

fn write_xlsx(path: &Path, result: &MergeResult) -> Result<()> {
    if result.row_count() + 1 > MAX_ROWS || result.column_count() > MAX_COLUMNS {
        return Err(IngestError::TooLarge {
            rows: result.row_count(),
            columns: result.column_count(),
        });
    }
    let write_error = |e: XlsxError| IngestError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Merged").map_err(write_error)?;
        write_rows(sheet, &bold, &result.headers, &result.rows).map_err(write_error)?;
    }

    if result.has_conflicts() {
        let headers = ["Row", "Column", "Left", "Right"].map(String::from);
        let rows: Vec<Vec<CellValue>> = result
            .conflicts
            .iter()
            .map(|c| {
                vec![
                    // Spreadsheet row number: 1-based, after the header row.
                    CellValue::Number((c.row + 2) as f64),
                    CellValue::text(c.column.as_str()),
                    CellValue::text(c.left.as_str()),
                    CellValue::text(c.right.as_str()),
                ]
            })
            .collect();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Conflicts").map_err(write_error)?;
        write_rows(sheet, &bold, &headers, &rows).map_err(write_error)?;
    }

    workbook.save(path).map_err(write_error)
}

fn write_rows(
    sheet: &mut Worksheet,
    header_format: &Format,
    headers: &[String],
    rows: &[Vec<CellValue>],
) -> std::result::Result<(), XlsxError> {
    // Bounds are checked by the caller.
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, header, header_format)?;
    }
    for (r, row) in rows.iter().enumerate() {
        let excel_row = (r + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                CellValue::Empty => {}
                CellValue::Text(text) => {
                    sheet.write_string(excel_row, col, text)?;
                }
                CellValue::Number(n) if n.is_finite() => {
                    sheet.write_number(excel_row, col, *n)?;
                }
                CellValue::Number(n) => {
                    sheet.write_string(excel_row, col, n.to_string())?;
                }
                CellValue::Bool(b) => {
                    sheet.write_boolean(excel_row, col, *b)?;
                }
            }
        }
    }
    sheet.set_freeze_panes(1, 0)?;
    sheet.autofit();
    Ok(())
}
