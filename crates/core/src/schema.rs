//! Required inventory columns and their resolution against a table header.

use serde::{Deserialize, Serialize};

use crate::error::{FilterError, FilterResult};
use crate::table::Table;

pub const ITEM_CODE_COLUMN: &str = "Nº do Item";
pub const DESCRIPTION_COLUMN: &str = "Descrição";
pub const QUANTITY_COLUMN: &str = "Quantidade Disponível";

/// Header names the pipeline looks up. Defaults match the ERP export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub item_code: String,
    pub description: String,
    pub available_quantity: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            item_code: ITEM_CODE_COLUMN.to_string(),
            description: DESCRIPTION_COLUMN.to_string(),
            available_quantity: QUANTITY_COLUMN.to_string(),
        }
    }
}

/// Positions of the three semantic columns inside a specific table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InventoryColumns {
    pub item_code: usize,
    pub description: usize,
    pub available_quantity: usize,
}

impl InventoryColumns {
    /// Locate every required column, failing with all missing names at once.
    pub fn resolve(table: &Table, names: &ColumnNames) -> FilterResult<Self> {
        let lookup = |name: &str| table.column_index(name.trim());

        let item_code = lookup(&names.item_code);
        let description = lookup(&names.description);
        let available_quantity = lookup(&names.available_quantity);

        match (item_code, description, available_quantity) {
            (Some(item_code), Some(description), Some(available_quantity)) => Ok(Self {
                item_code,
                description,
                available_quantity,
            }),
            _ => {
                let missing = [
                    (item_code, &names.item_code),
                    (description, &names.description),
                    (available_quantity, &names.available_quantity),
                ]
                .into_iter()
                .filter(|(found, _)| found.is_none())
                .map(|(_, name)| name.trim().to_string());
                Err(FilterError::missing_columns(missing))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_positions_after_trimming() {
        let table = Table::new(
            &[
                " Armazém",
                "Quantidade Disponível ",
                " Nº do Item",
                "Descrição",
            ],
            vec![],
        )
        .unwrap();
        let cols = InventoryColumns::resolve(&table, &ColumnNames::default()).unwrap();
        assert_eq!(
            cols,
            InventoryColumns {
                item_code: 2,
                description: 3,
                available_quantity: 1,
            }
        );
    }

    #[test]
    fn reports_every_missing_column() {
        let table = Table::new(&["Descrição", "Outro"], vec![]).unwrap();
        let err = InventoryColumns::resolve(&table, &ColumnNames::default()).unwrap_err();
        assert_eq!(
            err,
            FilterError::MissingColumns(vec![
                ITEM_CODE_COLUMN.to_string(),
                QUANTITY_COLUMN.to_string(),
            ])
        );
    }

    #[test]
    fn custom_names_are_honoured() {
        let table = Table::new(&["code", "desc", "qty"], vec![]).unwrap();
        let names = ColumnNames {
            item_code: "code".into(),
            description: "desc".into(),
            available_quantity: "qty".into(),
        };
        assert!(InventoryColumns::resolve(&table, &names).is_ok());
    }
}
