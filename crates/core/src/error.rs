//! Pipeline error model.

use thiserror::Error;

/// Result type used across the filtering pipeline.
pub type FilterResult<T> = Result<T, FilterError>;

/// Terminal failure of a filtering run.
///
/// Every variant aborts the whole invocation: the pipeline never hands back a
/// partially filtered table. Row numbers are source lines (the header is
/// line 1) when the reader recorded them, otherwise 1-based data rows.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// One or more required columns are absent after header trimming.
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A row carries more cells than the header declares.
    #[error("row {row} has {found} cells but the header declares {expected} columns")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A quantity cell is empty or not numeric.
    #[error("row {row}: available quantity {value:?} is not numeric")]
    NonNumericQuantity { row: usize, value: String },

    /// An internal invariant was violated.
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl FilterError {
    pub fn missing_columns<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingColumns(names.into_iter().map(Into::into).collect())
    }

    pub fn non_numeric_quantity(row: usize, value: impl Into<String>) -> Self {
        Self::NonNumericQuantity {
            row,
            value: value.into(),
        }
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }
}
