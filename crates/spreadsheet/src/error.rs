use std::path::PathBuf;

use thiserror::Error;

use stockfilter_core::FilterError;

#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("failed to read csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("workbook has no worksheet")]
    NoWorksheet,

    #[error("worksheet {name:?} not found (available: {})", available.join(", "))]
    SheetNotFound { name: String, available: Vec<String> },

    #[error("worksheet has no header row")]
    EmptySheet,

    #[error("table does not fit in a worksheet: {0}")]
    TooLarge(String),

    #[error(transparent)]
    Table(#[from] FilterError),
}

impl SpreadsheetError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
