//! The in-memory table the cleaning pipeline mutates in place.
//!
//! A [`Table`] is an ordered sequence of named columns. Each column holds
//! cells of a single kind fixed at load time: numeric (`Option<f64>`) or
//! text (`Option<String>`), with `None` as the explicit missing marker.
//! Every column has the same length at all times; stages that change the
//! row count go through [`Table::retain_rows`] so the removal is atomic
//! across columns.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Text,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Text => write!(f, "text"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cells {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl Cells {
    fn len(&self) -> usize {
        match self {
            Cells::Numeric(values) => values.len(),
            Cells::Text(values) => values.len(),
        }
    }
}

/// Cell representation used for whole-row equality during deduplication.
/// Numbers compare by bit pattern so the relation is total and deterministic;
/// missing equals missing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyCell {
    Missing,
    Number(u64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    cells: Cells,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            cells: Cells::Numeric(values),
        }
    }

    pub fn text(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            cells: Cells::Text(values),
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self.cells {
            Cells::Numeric(_) => ColumnKind::Numeric,
            Cells::Text(_) => ColumnKind::Text,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.len() == 0
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut Cells {
        &mut self.cells
    }

    pub fn missing_count(&self) -> usize {
        match &self.cells {
            Cells::Numeric(values) => values.iter().filter(|cell| cell.is_none()).count(),
            Cells::Text(values) => values.iter().filter(|cell| cell.is_none()).count(),
        }
    }

    /// Count of distinct present values.
    pub fn unique_present(&self) -> usize {
        match &self.cells {
            Cells::Numeric(values) => values
                .iter()
                .flatten()
                .map(|value| value.to_bits())
                .collect::<HashSet<_>>()
                .len(),
            Cells::Text(values) => values
                .iter()
                .flatten()
                .map(String::as_str)
                .collect::<HashSet<_>>()
                .len(),
        }
    }

    /// Renders the cell at `row` for output; `None` when the cell is missing.
    pub fn display_at(&self, row: usize) -> Option<String> {
        match &self.cells {
            Cells::Numeric(values) => values.get(row).copied().flatten().map(format_number),
            Cells::Text(values) => values.get(row).and_then(|cell| cell.clone()),
        }
    }

    fn key_at(&self, row: usize) -> KeyCell {
        match &self.cells {
            Cells::Numeric(values) => match values.get(row).copied().flatten() {
                Some(value) => KeyCell::Number(value.to_bits()),
                None => KeyCell::Missing,
            },
            Cells::Text(values) => match values.get(row).and_then(|cell| cell.as_deref()) {
                Some(value) => KeyCell::Text(value.to_string()),
                None => KeyCell::Missing,
            },
        }
    }

    fn retain_rows(&mut self, keep: &[bool]) {
        match &mut self.cells {
            Cells::Numeric(values) => {
                let mut flags = keep.iter();
                values.retain(|_| *flags.next().expect("keep mask covers every row"));
            }
            Cells::Text(values) => {
                let mut flags = keep.iter();
                values.retain(|_| *flags.next().expect("keep mask covers every row"));
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Builds a table from positionally-aligned columns.
    ///
    /// Panics when column lengths differ; constructing a ragged table is a
    /// programming error, not a recoverable condition.
    pub fn new(columns: Vec<Column>) -> Self {
        if let Some(first) = columns.first() {
            let rows = first.len();
            for column in &columns {
                assert_eq!(
                    column.len(),
                    rows,
                    "column '{}' length differs from '{}'",
                    column.name,
                    first.name
                );
            }
        }
        Self { columns }
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Index of the named column among text columns only.
    pub fn text_column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.name == name && column.kind() == ColumnKind::Text)
    }

    /// Whole-row equality key for row `row`.
    pub fn row_key(&self, row: usize) -> Vec<KeyCell> {
        self.columns.iter().map(|column| column.key_at(row)).collect()
    }

    /// Drops every row whose `keep` flag is false, atomically across columns.
    pub(crate) fn retain_rows(&mut self, keep: &[bool]) {
        assert_eq!(keep.len(), self.row_count(), "keep mask covers every row");
        for column in &mut self.columns {
            column.retain_rows(keep);
        }
    }
}

/// Renders a numeric cell, dropping the decimal point for whole values.
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
