//! Input side: spreadsheet files to [`Table`].

use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader, Xlsx};

use stockfilter_core::{CellValue, Row, Table};

use crate::error::SpreadsheetError;

/// Largest float that still represents every integer below it exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputFormat {
    /// xlsx / xlsm / xlsb / xls / ods, read through calamine.
    Workbook,
    Csv,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self, SpreadsheetError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Workbook),
            "csv" => Ok(Self::Csv),
            _ => Err(SpreadsheetError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Worksheet to read; the first one when unset. Ignored for CSV.
    pub sheet: Option<String>,
    pub csv_delimiter: u8,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            sheet: None,
            csv_delimiter: b',',
        }
    }
}

/// Read the file at `path` into a table, choosing the parser by extension.
///
/// The first row is the header. Rows whose cells are all blank are skipped;
/// every kept row remembers its line in the source file.
pub fn read_table(path: &Path, options: &ReadOptions) -> Result<Table, SpreadsheetError> {
    let table = match InputFormat::from_path(path)? {
        InputFormat::Workbook => {
            let mut workbook = open_workbook_auto(path)?;
            let range = select_range(&mut workbook, options.sheet.as_deref())?;
            range_to_table(&range)?
        }
        InputFormat::Csv => {
            let file = File::open(path).map_err(|e| SpreadsheetError::io(path, e))?;
            read_csv(file, options.csv_delimiter)?
        }
    };

    tracing::info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.columns().len(),
        "spreadsheet loaded"
    );
    Ok(table)
}

/// Read an in-memory xlsx document (e.g. an uploaded file).
pub fn read_xlsx_bytes(bytes: &[u8], sheet: Option<&str>) -> Result<Table, SpreadsheetError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).map_err(calamine::Error::from)?;
    let range = select_range(&mut workbook, sheet)?;
    range_to_table(&range)
}

fn select_range<RS, R>(workbook: &mut R, sheet: Option<&str>) -> Result<Range<Data>, SpreadsheetError>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: Into<calamine::Error>,
{
    let index = match sheet {
        None => 0,
        Some(name) => {
            let available = workbook.sheet_names();
            available
                .iter()
                .position(|s| s == name)
                .ok_or_else(|| SpreadsheetError::SheetNotFound {
                    name: name.to_string(),
                    available: available.clone(),
                })?
        }
    };

    workbook
        .worksheet_range_at(index)
        .ok_or(SpreadsheetError::NoWorksheet)?
        .map_err(|e| SpreadsheetError::Workbook(e.into()))
}

fn range_to_table(range: &Range<Data>) -> Result<Table, SpreadsheetError> {
    let first_line = range.start().map_or(1, |(row, _)| row as usize + 1);
    let mut rows = range.rows();
    let header = rows.next().ok_or(SpreadsheetError::EmptySheet)?;
    let headers: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| header_name(i, &cell.to_string()))
        .collect();

    let body: Vec<Row> = rows
        .enumerate()
        .map(|(i, cells)| {
            cells
                .iter()
                .map(cell_from_data)
                .collect::<Row>()
                .with_line(first_line + i + 1)
        })
        .filter(|row| !row.is_blank())
        .collect();

    Ok(Table::new(&headers, body)?)
}

fn header_name(index: usize, raw: &str) -> String {
    let name = raw.trim_start_matches('\u{feff}').trim();
    if name.is_empty() {
        format!("Unnamed: {index}")
    } else {
        name.to_string()
    }
}

/// Map a calamine cell onto the pipeline's cell model.
///
/// Whole floats become integers, since xlsx stores every number as a double.
/// Dates, durations and error cells are carried as their display text.
fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < MAX_EXACT_INTEGER => {
            CellValue::Int(*f as i64)
        }
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Text(other.to_string()),
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Text,
}

/// Read CSV text. Each column is typed as a whole: integer if every non-blank
/// cell parses as one, else float if every non-blank cell parses as a finite
/// one, else text. `NaN` and `inf` spellings therefore keep a column textual.
pub fn read_csv<R: Read>(reader: R, delimiter: u8) -> Result<Table, SpreadsheetError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| header_name(i, h))
        .collect();

    let mut raw: Vec<(usize, Vec<String>)> = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(raw.len() + 2, |p| p.line() as usize);
        raw.push((line, record.iter().map(str::to_string).collect()));
    }

    let width = raw
        .iter()
        .map(|(_, cells)| cells.len())
        .max()
        .unwrap_or(0)
        .max(headers.len());
    let kinds: Vec<ColumnKind> = (0..width)
        .map(|col| {
            infer_kind(
                raw.iter()
                    .filter_map(|(_, cells)| cells.get(col))
                    .map(String::as_str),
            )
        })
        .collect();

    let body: Vec<Row> = raw
        .into_iter()
        .map(|(line, cells)| {
            cells
                .into_iter()
                .zip(&kinds)
                .map(|(cell, kind)| parse_cell(cell, *kind))
                .collect::<Row>()
                .with_line(line)
        })
        .filter(|row| !row.is_blank())
        .collect();

    Ok(Table::new(&headers, body)?)
}

fn infer_kind<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut kind = ColumnKind::Int;
    for cell in cells.map(str::trim).filter(|c| !c.is_empty()) {
        if kind == ColumnKind::Int && cell.parse::<i64>().is_err() {
            kind = ColumnKind::Float;
        }
        if kind == ColumnKind::Float && parse_finite(cell).is_none() {
            return ColumnKind::Text;
        }
    }
    kind
}

fn parse_cell(cell: String, kind: ColumnKind) -> CellValue {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    match kind {
        ColumnKind::Int => trimmed.parse().map_or(CellValue::Text(cell.clone()), CellValue::Int),
        ColumnKind::Float => {
            parse_finite(trimmed).map_or(CellValue::Text(cell.clone()), CellValue::Float)
        }
        ColumnKind::Text => CellValue::Text(cell),
    }
}

fn parse_finite(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|f| f.is_finite())
}
