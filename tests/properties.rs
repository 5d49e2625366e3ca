use std::collections::HashSet;

use proptest::prelude::*;

use csv_cleanse::{
    dedup, impute, normalize,
    table::{Column, Table},
};

fn numeric_cells(rows: usize) -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::weighted(0.8, -1.0e6..1.0e6f64), rows..=rows)
}

fn text_cells(rows: usize) -> impl Strategy<Value = Vec<Option<String>>> {
    prop::collection::vec(prop::option::weighted(0.8, "[ A-Za-z]{0,6}"), rows..=rows)
}

fn two_column_table() -> impl Strategy<Value = Table> {
    (1usize..16)
        .prop_flat_map(|rows| (numeric_cells(rows), text_cells(rows)))
        .prop_map(|(numbers, labels)| {
            Table::new(vec![
                Column::numeric("amount", numbers),
                Column::text("label", labels),
            ])
        })
}

proptest! {
    #[test]
    fn imputation_leaves_no_missing_cells(table in two_column_table()) {
        let mut table = table;
        prop_assume!(table
            .columns()
            .iter()
            .all(|column| column.missing_count() < column.len()));

        impute::impute(&mut table).expect("every column has a present value");
        let missing: usize = table
            .columns()
            .iter()
            .map(|column| column.missing_count())
            .sum();
        prop_assert_eq!(missing, 0);
    }

    #[test]
    fn normalization_is_idempotent(table in two_column_table()) {
        let mut table = table;
        normalize::normalize(&mut table);
        let once = table.clone();
        let changed = normalize::normalize(&mut table);
        prop_assert!(changed.is_empty());
        prop_assert_eq!(&table, &once);
    }

    #[test]
    fn deduplication_leaves_pairwise_distinct_rows(table in two_column_table()) {
        let mut table = table;
        let before = table.row_count();
        let removed = dedup::deduplicate(&mut table);
        prop_assert_eq!(table.row_count() + removed, before);

        let keys: HashSet<_> = (0..table.row_count())
            .map(|row| table.row_key(row))
            .collect();
        prop_assert_eq!(keys.len(), table.row_count());
    }

    #[test]
    fn deduplication_is_idempotent(table in two_column_table()) {
        let mut table = table;
        dedup::deduplicate(&mut table);
        prop_assert_eq!(dedup::deduplicate(&mut table), 0);
    }
}
