//! Output side: [`Table`] to an xlsx download.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook};

use stockfilter_core::{CellValue, Table};

use crate::error::SpreadsheetError;

pub const OUTPUT_EXTENSION: &str = "xlsx";
const SHEET_NAME: &str = "Sheet1";

/// xlsx numbers are doubles; integers past 2^53 are written as text instead.
const MAX_EXACT_INTEGER: u64 = 1 << 53;

/// File name of a run's output: the date as `YYYY-MM-DD` plus `.xlsx`.
pub fn output_file_name(date: NaiveDate) -> String {
    format!("{}.{OUTPUT_EXTENSION}", date.format("%Y-%m-%d"))
}

/// Serialize a table to an xlsx document: one sheet, a bold header row, then
/// one row per record. Empty cells are left unwritten.
pub fn write_xlsx(table: &Table) -> Result<Vec<u8>, SpreadsheetError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in table.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, col_num(col)?, name, &header_format)?;
    }

    for (i, row) in table.rows().iter().enumerate() {
        let row_num = row_num(i + 1)?;
        for (col, cell) in row.cells().iter().enumerate() {
            let col = col_num(col)?;
            match cell {
                CellValue::Empty => {}
                CellValue::Text(s) => {
                    worksheet.write_string(row_num, col, s)?;
                }
                CellValue::Int(n) if n.unsigned_abs() > MAX_EXACT_INTEGER => {
                    worksheet.write_string(row_num, col, n.to_string())?;
                }
                CellValue::Int(n) => {
                    worksheet.write_number(row_num, col, *n as f64)?;
                }
                CellValue::Float(x) => {
                    worksheet.write_number(row_num, col, *x)?;
                }
                CellValue::Bool(b) => {
                    worksheet.write_boolean(row_num, col, *b)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Write `bytes` into `dir` under the dated output name, creating `dir` if
/// needed. Returns the full path written.
pub fn save_output(dir: &Path, date: NaiveDate, bytes: &[u8]) -> Result<PathBuf, SpreadsheetError> {
    std::fs::create_dir_all(dir).map_err(|e| SpreadsheetError::io(dir, e))?;
    let path = dir.join(output_file_name(date));
    std::fs::write(&path, bytes).map_err(|e| SpreadsheetError::io(&path, e))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "output written");
    Ok(path)
}

fn row_num(index: usize) -> Result<RowNum, SpreadsheetError> {
    RowNum::try_from(index)
        .map_err(|_| SpreadsheetError::TooLarge(format!("row {index} exceeds the row limit")))
}

fn col_num(index: usize) -> Result<ColNum, SpreadsheetError> {
    ColNum::try_from(index)
        .map_err(|_| SpreadsheetError::TooLarge(format!("column {index} exceeds the column limit")))
}
