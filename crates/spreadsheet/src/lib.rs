//! Spreadsheet collaborators around the filtering pipeline.
//!
//! - [`reader`]: workbook / CSV files to a [`Table`](stockfilter_core::Table).
//! - [`writer`]: a table to xlsx bytes and a dated output file.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::SpreadsheetError;
pub use reader::{read_csv, read_table, read_xlsx_bytes, InputFormat, ReadOptions};
pub use writer::{output_file_name, save_output, write_xlsx};
