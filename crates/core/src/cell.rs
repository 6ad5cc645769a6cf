//! Cell values: the dynamically-typed content of a spreadsheet cell.

use core::fmt;

/// A single cell as delivered by the input collaborator.
///
/// Spreadsheets do not carry a schema, so a column that is "supposed" to hold
/// strings can still contain numbers, booleans or blanks. Rules downstream
/// decide what each shape means; nothing here rejects a value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Borrow the string content, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the cell (`Int` and `Float` only).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Absolute value of a numeric cell; other cells are returned unchanged.
    ///
    /// Integers keep their integer type. `i64::MIN` saturates to `i64::MAX`.
    pub fn abs(&self) -> CellValue {
        match self {
            CellValue::Int(i) => CellValue::Int(i.saturating_abs()),
            CellValue::Float(f) => CellValue::Float(f.abs()),
            other => other.clone(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(x) => write!(f, "{x}"),
            CellValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abs_preserves_numeric_kind() {
        assert_eq!(CellValue::Int(-7).abs(), CellValue::Int(7));
        assert_eq!(CellValue::Float(-2.5).abs(), CellValue::Float(2.5));
        assert_eq!(CellValue::Int(i64::MIN).abs(), CellValue::Int(i64::MAX));
    }

    #[test]
    fn abs_leaves_non_numeric_cells_alone() {
        assert_eq!(CellValue::text("x").abs(), CellValue::text("x"));
        assert_eq!(CellValue::Empty.abs(), CellValue::Empty);
    }

    #[test]
    fn display_of_empty_is_blank() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::Int(-3).to_string(), "-3");
        assert_eq!(CellValue::Bool(true).to_string(), "true");
    }

    #[test]
    fn whitespace_text_counts_as_empty() {
        assert!(CellValue::text("   ").is_empty());
        assert!(!CellValue::Int(0).is_empty());
    }
}
