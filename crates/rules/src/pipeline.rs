//! End-to-end filtering of one in-memory table.

use stockfilter_core::{FilterResult, InventoryColumns, Table};

use crate::filter::build_mask;
use crate::normalizer::normalize;
use crate::report::FilterReport;
use crate::ruleset::FilterConfig;

/// Output table plus the statistics of the run that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub table: Table,
    pub report: FilterReport,
}

/// Resolve the schema, mask every row, then normalize the survivors.
///
/// Any schema or type error aborts the run before a table is produced.
pub fn process(table: Table, config: &FilterConfig) -> FilterResult<FilterOutcome> {
    let span = tracing::info_span!("filter_table", rows = table.len());
    let _guard = span.enter();

    let columns = InventoryColumns::resolve(&table, &config.columns)?;
    let mask = build_mask(&table, &columns, &config.rules)?;
    let report = FilterReport::from_mask(&mask);
    let table = normalize(table, &columns, &mask)?;

    tracing::info!(
        rows_in = report.rows_in,
        rows_out = report.rows_out,
        rejected_code = report.rejected_code,
        rejected_prefix = report.rejected_prefix,
        rejected_description = report.rejected_description,
        rejected_quantity = report.rejected_quantity,
        "table filtered"
    );

    Ok(FilterOutcome { table, report })
}
