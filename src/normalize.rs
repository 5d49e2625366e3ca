//! Canonicalizes text columns: every present cell becomes its trimmed,
//! lower-case form. Missing cells stay missing, so the stage is safe to run
//! even when imputation was skipped. Idempotent by construction.

use crate::table::{Cells, Table};

/// Normalizes every text column in place and returns the names of columns
/// where at least one cell actually changed.
pub fn normalize(table: &mut Table) -> Vec<String> {
    let mut changed = Vec::new();
    for column in table.columns_mut() {
        let Cells::Text(values) = column.cells_mut() else {
            continue;
        };
        let mut touched = false;
        for cell in values.iter_mut().flatten() {
            if let Some(canonical) = canonicalize(cell) {
                *cell = canonical;
                touched = true;
            }
        }
        if touched {
            changed.push(column.name.clone());
        }
    }
    changed
}

/// Canonical form of a text cell, or `None` when the cell already is one.
pub(crate) fn canonicalize(value: &str) -> Option<String> {
    let canonical = value.trim().to_lowercase();
    if canonical == value {
        None
    } else {
        Some(canonical)
    }
}
