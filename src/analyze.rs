//! Cardinality analysis of text columns.
//!
//! Read-only: classifies each text column by how many distinct present values
//! it holds, flagging low-cardinality columns as candidates for manual value
//! mapping and full-cardinality columns as likely identifiers.

use std::fmt;

use serde::Serialize;

use crate::table::{ColumnKind, Table};

/// Inclusive upper bound on distinct values for a mapping candidate.
pub const MAX_MAPPING_CARDINALITY: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    LowCardinalityCandidate,
    LikelyIdentifier,
    Normal,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::LowCardinalityCandidate => write!(f, "mapping candidate"),
            Classification::LikelyIdentifier => write!(f, "likely identifier"),
            Classification::Normal => write!(f, "normal"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryProfile {
    pub column: String,
    pub unique_values: usize,
    pub total_rows: usize,
    pub classification: Classification,
}

/// Profiles every text column in column order. Never mutates the table.
pub fn analyze(table: &Table) -> Vec<CategoryProfile> {
    let total_rows = table.row_count();
    table
        .columns()
        .iter()
        .filter(|column| column.kind() == ColumnKind::Text)
        .map(|column| {
            let unique_values = column.unique_present();
            CategoryProfile {
                column: column.name.clone(),
                unique_values,
                total_rows,
                classification: classify(unique_values, total_rows),
            }
        })
        .collect()
}

fn classify(unique: usize, total_rows: usize) -> Classification {
    if unique > 1 && unique <= MAX_MAPPING_CARDINALITY {
        Classification::LowCardinalityCandidate
    } else if unique == total_rows && total_rows > 1 {
        Classification::LikelyIdentifier
    } else {
        Classification::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn table_with_uniques(unique: usize, rows: usize) -> Table {
        let values = (0..rows)
            .map(|row| Some(format!("v{}", row % unique.max(1))))
            .collect();
        Table::new(vec![Column::text("c", values)])
    }

    #[test]
    fn low_cardinality_boundaries_are_inclusive() {
        for unique in [2, 20] {
            let profiles = analyze(&table_with_uniques(unique, 50));
            assert_eq!(
                profiles[0].classification,
                Classification::LowCardinalityCandidate,
                "unique = {unique}"
            );
        }
        let profiles = analyze(&table_with_uniques(21, 50));
        assert_eq!(profiles[0].classification, Classification::Normal);
    }

    #[test]
    fn single_value_column_is_normal() {
        let profiles = analyze(&table_with_uniques(1, 10));
        assert_eq!(profiles[0].classification, Classification::Normal);
        assert_eq!(profiles[0].unique_values, 1);
    }

    #[test]
    fn all_unique_column_is_likely_identifier() {
        let profiles = analyze(&table_with_uniques(30, 30));
        assert_eq!(profiles[0].classification, Classification::LikelyIdentifier);
    }

    #[test]
    fn single_row_table_is_not_an_identifier() {
        let profiles = analyze(&table_with_uniques(1, 1));
        assert_eq!(profiles[0].classification, Classification::Normal);
    }

    #[test]
    fn numeric_columns_are_not_profiled() {
        let table = Table::new(vec![
            Column::numeric("n", vec![Some(1.0), Some(2.0)]),
            Column::text("t", vec![Some("a".into()), Some("b".into())]),
        ]);
        let profiles = analyze(&table);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].column, "t");
    }

    #[test]
    fn missing_cells_do_not_count_toward_cardinality() {
        let table = Table::new(vec![Column::text(
            "t",
            vec![Some("a".into()), None, Some("a".into()), None],
        )]);
        let profiles = analyze(&table);
        assert_eq!(profiles[0].unique_values, 1);
        assert_eq!(profiles[0].total_rows, 4);
    }
}
