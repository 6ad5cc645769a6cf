//! Row filter: combines the classifier with the exclusion rules into a mask.

use stockfilter_core::{CellValue, FilterError, FilterResult, InventoryColumns, Row, Table};

use crate::classifier::{code_prefix, is_eligible_code};
use crate::ruleset::RuleSet;

/// Outcome of every retention condition for a single row.
///
/// All four conditions are always evaluated, so the verdict also explains why
/// a row was dropped.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RowVerdict {
    pub code_eligible: bool,
    pub prefix_allowed: bool,
    pub description_allowed: bool,
    pub quantity_negative: bool,
}

impl RowVerdict {
    pub fn retained(&self) -> bool {
        self.code_eligible && self.prefix_allowed && self.description_allowed && self.quantity_negative
    }
}

/// One verdict per table row, in row order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterMask {
    verdicts: Vec<RowVerdict>,
}

impl FilterMask {
    pub fn verdicts(&self) -> &[RowVerdict] {
        &self.verdicts
    }

    pub fn to_bools(&self) -> Vec<bool> {
        self.verdicts.iter().map(RowVerdict::retained).collect()
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    pub fn retained_count(&self) -> usize {
        self.verdicts.iter().filter(|v| v.retained()).count()
    }
}

/// Evaluate the retention conditions for every row of `table`.
///
/// Fails on the first quantity cell that is empty or not numeric; no mask is
/// produced in that case.
pub fn build_mask(
    table: &Table,
    columns: &InventoryColumns,
    rules: &RuleSet,
) -> FilterResult<FilterMask> {
    let verdicts = table
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| evaluate_row(row.line().unwrap_or(i + 1), row, columns, rules))
        .collect::<FilterResult<Vec<_>>>()?;

    Ok(FilterMask { verdicts })
}

/// Verdict for a single row. `row_number` is only used in errors and logs.
pub fn evaluate_row(
    row_number: usize,
    row: &Row,
    columns: &InventoryColumns,
    rules: &RuleSet,
) -> FilterResult<RowVerdict> {
    let code = row.get(columns.item_code);

    let verdict = RowVerdict {
        code_eligible: is_eligible_code(code, rules),
        prefix_allowed: !code_prefix(code).is_some_and(|p| rules.is_excluded_prefix(p)),
        description_allowed: description_allowed(row.get(columns.description), rules),
        quantity_negative: is_negative_quantity(row_number, row.get(columns.available_quantity))?,
    };

    if !verdict.retained() {
        tracing::debug!(
            row = row_number,
            code = %code,
            code_eligible = verdict.code_eligible,
            prefix_allowed = verdict.prefix_allowed,
            description_allowed = verdict.description_allowed,
            quantity_negative = verdict.quantity_negative,
            "row dropped"
        );
    }

    Ok(verdict)
}

/// Descriptions starting with the restricted prefix are dropped unless the
/// whole lower-cased description is explicitly preserved.
fn description_allowed(description: &CellValue, rules: &RuleSet) -> bool {
    let lowered = description.to_string().to_lowercase();
    !lowered.starts_with(rules.restricted_description_prefix())
        || rules.is_preserved_description(&lowered)
}

fn is_negative_quantity(row_number: usize, quantity: &CellValue) -> FilterResult<bool> {
    match quantity {
        CellValue::Int(q) => Ok(*q < 0),
        CellValue::Float(q) => Ok(*q < 0.0),
        other => Err(FilterError::non_numeric_quantity(row_number, other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockfilter_core::ColumnNames;

    fn table(rows: Vec<(CellValue, &str, CellValue)>) -> Table {
        let rows = rows
            .into_iter()
            .map(|(code, desc, qty)| Row::new(vec![code, CellValue::text(desc), qty]))
            .collect();
        Table::new(&["Nº do Item", "Descrição", "Quantidade Disponível"], rows).unwrap()
    }

    fn verdicts(rows: Vec<(CellValue, &str, CellValue)>) -> Vec<RowVerdict> {
        let table = table(rows);
        let cols = InventoryColumns::resolve(&table, &ColumnNames::default()).unwrap();
        build_mask(&table, &cols, &RuleSet::default())
            .unwrap()
            .verdicts()
            .to_vec()
    }

    fn single(code: &str, desc: &str, qty: i64) -> RowVerdict {
        verdicts(vec![(CellValue::text(code), desc, CellValue::Int(qty))])[0]
    }

    #[test]
    fn coladur_description_is_dropped() {
        let v = single("ABC.99", "Coladur X", -5);
        assert!(v.code_eligible && v.prefix_allowed && v.quantity_negative);
        assert!(!v.description_allowed);
        assert!(!v.retained());
    }

    #[test]
    fn allow_listed_code_with_preserved_description_is_kept() {
        assert!(single("973473.L1", "fortbio 1008", -3).retained());
    }

    #[test]
    fn preserved_description_match_is_case_insensitive() {
        let rules = RuleSet::new(
            Vec::<String>::new(),
            ["coladur especial"],
            Vec::<String>::new(),
            "coladur",
        )
        .unwrap();
        assert!(description_allowed(&CellValue::text("COLADUR Especial"), &rules));
        assert!(!description_allowed(&CellValue::text("Coladur Especial 2"), &rules));
    }

    #[test]
    fn excluded_prefix_is_dropped() {
        let v = single("AE5.12", "Widget", -10);
        assert!(v.code_eligible && v.quantity_negative);
        assert!(!v.prefix_allowed);
    }

    #[test]
    fn non_negative_quantity_is_dropped() {
        assert!(!single("XYZ.01", "Widget", 7).retained());
        assert!(!single("XYZ.01", "Widget", 0).retained());
    }

    #[test]
    fn short_codes_are_never_prefix_excluded() {
        let v = single("AE", "Widget", -1);
        assert!(v.prefix_allowed);
        assert!(!v.code_eligible);
    }

    #[test]
    fn float_quantities_are_compared_numerically() {
        let v = verdicts(vec![(CellValue::text("XYZ.01"), "w", CellValue::Float(-0.5))]);
        assert!(v[0].retained());
    }

    #[test]
    fn non_numeric_quantity_aborts() {
        let table = table(vec![
            (CellValue::text("XYZ.01"), "w", CellValue::Int(-1)),
            (CellValue::text("XYZ.02"), "w", CellValue::text("muitos")),
        ]);
        let cols = InventoryColumns::resolve(&table, &ColumnNames::default()).unwrap();
        let err = build_mask(&table, &cols, &RuleSet::default()).unwrap_err();
        assert_eq!(err, FilterError::non_numeric_quantity(2, "muitos"));
    }

    #[test]
    fn type_error_names_the_source_line() {
        let rows = vec![
            Row::new(vec![CellValue::text("XYZ.01"), CellValue::text("w"), CellValue::Int(-1)])
                .with_line(2),
            Row::new(vec![CellValue::text("XYZ.02"), CellValue::text("w"), CellValue::text("x")])
                .with_line(5),
        ];
        let table = Table::new(&["Nº do Item", "Descrição", "Quantidade Disponível"], rows).unwrap();
        let cols = InventoryColumns::resolve(&table, &ColumnNames::default()).unwrap();
        let err = build_mask(&table, &cols, &RuleSet::default()).unwrap_err();
        assert_eq!(err, FilterError::non_numeric_quantity(5, "x"));
    }

    #[test]
    fn retained_count_matches_bools() {
        let table = table(vec![
            (CellValue::text("XYZ.01"), "w", CellValue::Int(-1)),
            (CellValue::text("XYZ.02"), "w", CellValue::Int(1)),
        ]);
        let cols = InventoryColumns::resolve(&table, &ColumnNames::default()).unwrap();
        let mask = build_mask(&table, &cols, &RuleSet::default()).unwrap();
        assert_eq!(mask.retained_count(), 1);
        assert_eq!(mask.to_bools(), vec![true, false]);
    }

    #[test]
    fn empty_quantity_aborts() {
        let table = table(vec![(CellValue::text("XYZ.01"), "w", CellValue::Empty)]);
        let cols = InventoryColumns::resolve(&table, &ColumnNames::default()).unwrap();
        let err = build_mask(&table, &cols, &RuleSet::default()).unwrap_err();
        assert!(matches!(err, FilterError::NonNumericQuantity { row: 1, .. }));
    }

    #[test]
    fn every_condition_is_evaluated_for_every_row() {
        let v = single("AE5", "coladur", 3);
        assert_eq!(
            v,
            RowVerdict {
                code_eligible: false,
                prefix_allowed: false,
                description_allowed: false,
                quantity_negative: false,
            }
        );
    }
}
