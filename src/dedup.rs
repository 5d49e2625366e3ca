//! Removes fully-duplicate rows, keeping first occurrences.

use std::collections::HashSet;

use crate::table::Table;

/// Drops every row that equals an earlier row across all columns and returns
/// how many were removed. Missing equals missing; relative order of the kept
/// rows is preserved. The removal is atomic: a row disappears from every
/// column or from none.
pub fn deduplicate(table: &mut Table) -> usize {
    let rows = table.row_count();
    let mut seen = HashSet::with_capacity(rows);
    let mut keep = Vec::with_capacity(rows);
    for row in 0..rows {
        keep.push(seen.insert(table.row_key(row)));
    }
    let removed = keep.iter().filter(|flag| !**flag).count();
    if removed > 0 {
        table.retain_rows(&keep);
    }
    removed
}
