//! Inventory row-selection rules.
//!
//! This crate contains the decision logic of the filter, implemented as pure
//! deterministic functions over an in-memory [`Table`](stockfilter_core::Table)
//! (no file access, no host concerns):
//!
//! - [`classifier`]: is an item code eligible at all?
//! - [`filter`]: per-row verdicts combining every retention rule.
//! - [`normalizer`]: blank, flip and sort the surviving rows.
//! - [`pipeline`]: the three stages wired together.

pub mod classifier;
pub mod filter;
pub mod normalizer;
pub mod pipeline;
pub mod report;
pub mod ruleset;

pub use classifier::is_eligible_code;
pub use filter::{FilterMask, RowVerdict, build_mask};
pub use normalizer::normalize;
pub use pipeline::{FilterOutcome, process};
pub use report::FilterReport;
pub use ruleset::{FilterConfig, RuleSet, RuleSetError};
