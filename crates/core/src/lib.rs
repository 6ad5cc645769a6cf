//! `stockfilter-core` — table model shared by every stage of the pipeline.
//!
//! This crate contains **pure data** primitives (no file access, no rules).

pub mod cell;
pub mod error;
pub mod schema;
pub mod table;

pub use cell::CellValue;
pub use error::{FilterError, FilterResult};
pub use schema::{ColumnNames, InventoryColumns};
pub use table::{Row, Table};
