//! In-memory table: ordered column names plus ordered rows of cells.

use std::collections::HashSet;

use crate::cell::CellValue;
use crate::error::{FilterError, FilterResult};

/// One record. Cells are positionally aligned with [`Table::columns`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: Vec<CellValue>,
    line: Option<usize>,
}

impl Row {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells, line: None }
    }

    /// Remember the 1-based line of the source file this row came from.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    /// Cell at `index`; positions past the end read as [`CellValue::Empty`].
    pub fn get(&self, index: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.cells.get(index).unwrap_or(&EMPTY)
    }

    pub fn cell_mut(&mut self, index: usize) -> Option<&mut CellValue> {
        self.cells.get_mut(index)
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(CellValue::is_empty)
    }
}

impl<T: Into<CellValue>> FromIterator<T> for Row {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Row::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Ordered rows sharing one column set.
///
/// Construction trims header whitespace, renames repeated headers (`Obs`,
/// `Obs.1`, `Obs.2`, ...) and pads short rows so that every row is exactly as
/// wide as the header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new<S: AsRef<str>>(headers: &[S], rows: Vec<Row>) -> FilterResult<Self> {
        let mut seen = HashSet::with_capacity(headers.len());
        let mut columns = Vec::with_capacity(headers.len());
        for header in headers {
            let base = header.as_ref().trim();
            let mut name = base.to_string();
            let mut suffix = 1;
            while seen.contains(&name) {
                name = format!("{base}.{suffix}");
                suffix += 1;
            }
            seen.insert(name.clone());
            columns.push(name);
        }

        let width = columns.len();
        let mut normalized = Vec::with_capacity(rows.len());
        for (i, mut row) in rows.into_iter().enumerate() {
            let found = row.cells.len();
            if found > width {
                return Err(FilterError::RaggedRow {
                    row: row.line.unwrap_or(i + 1),
                    expected: width,
                    found,
                });
            }
            row.cells.resize(width, CellValue::Empty);
            normalized.push(row);
        }

        Ok(Self {
            columns,
            rows: normalized,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact (already trimmed) name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Drop every row whose mask entry is `false`, preserving order.
    pub fn retain_by_mask(&mut self, mask: &[bool]) -> FilterResult<()> {
        if mask.len() != self.rows.len() {
            return Err(FilterError::invariant(format!(
                "mask has {} entries but table has {} rows",
                mask.len(),
                self.rows.len()
            )));
        }
        let mut keep = mask.iter().copied();
        self.rows.retain(|_| keep.next().unwrap_or(false));
        Ok(())
    }

    /// Stable sort of the rows.
    pub fn sort_rows_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Row, &Row) -> core::cmp::Ordering,
    {
        self.rows.sort_by(compare);
    }
}
