//! Row normalizer: applies the mask and rewrites the surviving rows.

use stockfilter_core::{CellValue, FilterError, FilterResult, InventoryColumns, Table};

use crate::filter::FilterMask;

/// Produce the output table from `table` and its mask.
///
/// Retained rows get an empty description and the absolute value of their
/// quantity, then are sorted by item code. The sort is stable, so rows with
/// the same code keep their input order.
pub fn normalize(
    mut table: Table,
    columns: &InventoryColumns,
    mask: &FilterMask,
) -> FilterResult<Table> {
    table.retain_by_mask(&mask.to_bools())?;

    for row in table.rows_mut() {
        let description = row
            .cell_mut(columns.description)
            .ok_or_else(|| FilterError::invariant("description column out of range"))?;
        *description = CellValue::text("");

        let quantity = row
            .cell_mut(columns.available_quantity)
            .ok_or_else(|| FilterError::invariant("quantity column out of range"))?;
        *quantity = quantity.abs();
    }

    let code = columns.item_code;
    table.sort_rows_by(|a, b| sort_key(a.get(code)).cmp(&sort_key(b.get(code))));

    Ok(table)
}

fn sort_key(code: &CellValue) -> &str {
    code.as_text().unwrap_or_default()
}
