//! Reading one sheet from a CSV file or a workbook.

use std::fs::File;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use samara_model::{CellValue, Sheet};

use crate::error::{IngestError, Result};
use crate::format::SheetFormat;

/// Reads a sheet; the first row is the header row.
///
/// `sheet` picks a worksheet by name and defaults to the first one. CSV files
/// have a single sheet named after the file stem, so `sheet` is ignored there.
///
/// Headers are trimmed. Data rows are padded or cut to the header width and
/// fully empty rows at the end are dropped.
pub fn read_sheet(path: &Path, sheet: Option<&str>) -> Result<Sheet> {
    let format = SheetFormat::from_path(path)?;
    let _span = tracing::debug_span!("read_sheet", path = %path.display(), %format).entered();

    let (name, mut rows) = if format.is_workbook() {
        read_workbook_rows(path, sheet)?
    } else {
        if let Some(sheet) = sheet {
            tracing::debug!(sheet, "sheet name ignored for CSV input");
        }
        (file_stem(path), read_csv_rows(path)?)
    };

    let sheet = build_sheet(path, name, &mut rows)?;
    tracing::info!(
        path = %path.display(),
        sheet = %sheet.name,
        rows = sheet.row_count(),
        columns = sheet.column_count(),
        "loaded sheet"
    );
    Ok(sheet)
}

/// Worksheet names in workbook order. CSV files report their file stem.
pub fn list_sheets(path: &Path) -> Result<Vec<String>> {
    if SheetFormat::from_path(path)?.is_workbook() {
        let workbook = open_workbook_auto(path).map_err(|e| workbook_error(path, &e))?;
        Ok(workbook.sheet_names())
    } else {
        Ok(vec![file_stem(path)])
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn workbook_error(path: &Path, error: &calamine::Error) -> IngestError {
    match error {
        calamine::Error::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        }
        other => IngestError::Workbook {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    }
}

fn read_csv_rows(path: &Path) -> Result<Vec<Vec<CellValue>>> {
    let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(record.iter().map(CellValue::text).collect());
    }
    Ok(rows)
}

fn read_workbook_rows(path: &Path, sheet: Option<&str>) -> Result<(String, Vec<Vec<CellValue>>)> {
    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(path, &e))?;
    let names = workbook.sheet_names();

    let name = match sheet {
        Some(wanted) => names
            .iter()
            .find(|n| n.as_str() == wanted)
            .cloned()
            .ok_or_else(|| IngestError::SheetNotFound {
                path: path.to_path_buf(),
                sheet: wanted.to_string(),
                available: names.join(", "),
            })?,
        None => names
            .first()
            .cloned()
            .ok_or_else(|| IngestError::EmptySheet {
                path: path.to_path_buf(),
            })?,
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| workbook_error(path, &e))?;
    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();
    Ok((name, rows))
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s.as_str()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::DateTime(dt) if dt.is_duration() => CellValue::Number(dt.as_f64()),
        Data::DateTime(dt) => excel_serial_to_text(dt.as_f64())
            .map_or(CellValue::Number(dt.as_f64()), CellValue::Text),
    }
}

/// Renders an Excel serial date (1900 system) as `YYYY-MM-DD`, adding the
/// time of day when there is one.
///
/// Excel counts a 1900-02-29 that never existed as serial 60, so serials
/// below it are one day off a plain 1899-12-30 epoch and 60 itself is
/// rendered as that fictitious date.
fn excel_serial_to_text(serial: f64) -> Option<String> {
    // 9999-12-31 is the last date Excel can show.
    if !(0.0..2_958_466.0).contains(&serial) {
        return None;
    }
    let midnight = NaiveTime::from_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    let has_time = millis % 86_400_000 != 0;
    let (epoch, millis) = if serial < 60.0 {
        (NaiveDate::from_ymd_opt(1899, 12, 31)?, millis)
    } else if serial < 61.0 {
        let time = midnight.overflowing_add_signed(TimeDelta::try_milliseconds(
            millis - 60 * 86_400_000,
        )?);
        return Some(if has_time {
            format!("1900-02-29 {}", time.0.format("%H:%M:%S"))
        } else {
            "1900-02-29".to_string()
        });
    } else {
        (NaiveDate::from_ymd_opt(1899, 12, 30)?, millis)
    };
    let value = epoch
        .and_time(midnight)
        .checked_add_signed(TimeDelta::try_milliseconds(millis)?)?;
    if has_time {
        Some(value.format("%Y-%m-%d %H:%M:%S").to_string())
    } else {
        Some(value.format("%Y-%m-%d").to_string())
    }
}

fn build_sheet(path: &Path, name: String, rows: &mut Vec<Vec<CellValue>>) -> Result<Sheet> {
    while rows
        .last()
        .is_some_and(|row| row.iter().all(CellValue::is_empty))
    {
        rows.pop();
    }
    if rows.is_empty() {
        return Err(IngestError::EmptySheet {
            path: path.to_path_buf(),
        });
    }

    let header_row = rows.remove(0);
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| {
            let text = cell.to_string();
            text.trim_start_matches('\u{feff}').trim().to_string()
        })
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptySheet {
            path: path.to_path_buf(),
        });
    }

    let width = headers.len();
    let mut sheet = Sheet::new(name, headers);
    for mut row in rows.drain(..) {
        if row.len() > width {
            if row[width..].iter().any(|cell| !cell.is_empty()) {
                tracing::warn!(
                    path = %path.display(),
                    cells = row.len() - width,
                    "dropping values beyond the last header"
                );
            }
            row.truncate(width);
        }
        row.resize(width, CellValue::Empty);
        sheet.push_row(row);
    }
    Ok(sheet)
}
