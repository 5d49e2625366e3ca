//! Missing-value imputation: numeric columns take their median, text columns
//! their mode. One [`ImputationRecord`] is emitted per column that actually
//! had something to fill.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    error::{CleanseError, Result},
    table::{format_number, Cells, ColumnKind, Table},
};

/// What a single column imputation did; immutable once created.
#[derive(Debug, Clone, Serialize)]
pub struct ImputationRecord {
    pub column: String,
    pub kind: ColumnKind,
    pub missing_count: usize,
    pub missing_percent: f64,
    pub fill_value: String,
    pub strategy: &'static str,
}

/// Fills every missing cell in place.
///
/// Numeric columns are processed before text columns; within each group,
/// column order is preserved. The grouping affects only the order of the
/// emitted records. A column with no present values at all has no median or
/// mode, so the run aborts with [`CleanseError::DataQuality`].
pub fn impute(table: &mut Table) -> Result<Vec<ImputationRecord>> {
    let rows = table.row_count();
    let mut records = Vec::new();
    for kind in [ColumnKind::Numeric, ColumnKind::Text] {
        for column in table.columns_mut() {
            if column.kind() != kind {
                continue;
            }
            let missing = column.missing_count();
            if missing == 0 {
                continue;
            }
            let name = column.name.clone();
            let fill_value = match column.cells_mut() {
                Cells::Numeric(values) => {
                    let fill = median(values).ok_or(CleanseError::DataQuality {
                        column: name.clone(),
                    })?;
                    for cell in values.iter_mut() {
                        cell.get_or_insert(fill);
                    }
                    format_number(fill)
                }
                Cells::Text(values) => {
                    let fill = mode(values).ok_or(CleanseError::DataQuality {
                        column: name.clone(),
                    })?;
                    for cell in values.iter_mut() {
                        cell.get_or_insert_with(|| fill.clone());
                    }
                    fill
                }
            };
            records.push(ImputationRecord {
                column: name,
                kind,
                missing_count: missing,
                missing_percent: missing as f64 * 100.0 / rows as f64,
                fill_value,
                strategy: match kind {
                    ColumnKind::Numeric => "median",
                    ColumnKind::Text => "mode",
                },
            });
        }
    }
    Ok(records)
}

fn median(values: &[Option<f64>]) -> Option<f64> {
    let mut present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return None;
    }
    present.sort_by(f64::total_cmp);
    let mid = present.len() / 2;
    if present.len().is_multiple_of(2) {
        Some((present[mid - 1] + present[mid]) / 2.0)
    } else {
        Some(present[mid])
    }
}

/// Most frequent present value; ties break toward the value seen first.
fn mode(values: &[Option<String>]) -> Option<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (order, value) in values.iter().flatten().enumerate() {
        counts.entry(value.as_str()).or_insert((0, order)).0 += 1;
    }
    counts
        .into_iter()
        .min_by_key(|&(_, (count, first_seen))| (std::cmp::Reverse(count), first_seen))
        .map(|(value, _)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn text_cells(values: &[Option<&str>]) -> Vec<Option<String>> {
        values
            .iter()
            .map(|cell| cell.map(|value| value.to_string()))
            .collect()
    }

    #[test]
    fn numeric_missing_filled_with_median() {
        let mut table = Table::new(vec![Column::numeric(
            "score",
            vec![Some(1.0), None, Some(3.0), None, Some(5.0)],
        )]);
        let records = impute(&mut table).expect("impute");
        assert_eq!(table.column("score").unwrap().missing_count(), 0);
        let rendered: Vec<_> = (0..5)
            .map(|row| table.column("score").unwrap().display_at(row).unwrap())
            .collect();
        assert_eq!(rendered, ["1", "3", "3", "3", "5"]);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.column, "score");
        assert_eq!(record.kind, ColumnKind::Numeric);
        assert_eq!(record.missing_count, 2);
        assert_eq!(record.missing_percent, 40.0);
        assert_eq!(record.fill_value, "3");
        assert_eq!(record.strategy, "median");
    }

    #[test]
    fn even_count_median_averages_middle_pair() {
        assert_eq!(median(&[Some(4.0), Some(1.0), Some(3.0), Some(2.0)]), Some(2.5));
        assert_eq!(median(&[Some(7.0)]), Some(7.0));
        assert_eq!(median(&[None, None]), None);
    }

    #[test]
    fn text_missing_filled_with_mode() {
        let mut table = Table::new(vec![Column::text(
            "label",
            text_cells(&[Some("a"), Some("a"), Some("b"), None]),
        )]);
        let records = impute(&mut table).expect("impute");
        assert_eq!(table.column("label").unwrap().display_at(3).as_deref(), Some("a"));
        assert_eq!(records[0].strategy, "mode");
        assert_eq!(records[0].fill_value, "a");
    }

    #[test]
    fn mode_ties_break_toward_first_seen() {
        let cells = text_cells(&[Some("b"), Some("a"), Some("a"), Some("b")]);
        assert_eq!(mode(&cells).as_deref(), Some("b"));
    }

    #[test]
    fn fully_missing_numeric_column_aborts() {
        let mut table = Table::new(vec![Column::numeric("empty", vec![None, None])]);
        let err = impute(&mut table).unwrap_err();
        match err {
            CleanseError::DataQuality { column } => assert_eq!(column, "empty"),
            other => panic!("expected DataQuality, got {other:?}"),
        }
    }

    #[test]
    fn clean_columns_emit_no_records() {
        let mut table = Table::new(vec![
            Column::numeric("a", vec![Some(1.0), Some(2.0)]),
            Column::text("b", text_cells(&[Some("x"), Some("y")])),
        ]);
        let records = impute(&mut table).expect("impute");
        assert!(records.is_empty());
    }

    #[test]
    fn numeric_records_precede_text_records() {
        let mut table = Table::new(vec![
            Column::text("t", text_cells(&[Some("x"), None])),
            Column::numeric("n", vec![Some(2.0), None]),
        ]);
        let records = impute(&mut table).expect("impute");
        let order: Vec<_> = records.iter().map(|record| record.column.as_str()).collect();
        assert_eq!(order, ["n", "t"]);
    }
}
