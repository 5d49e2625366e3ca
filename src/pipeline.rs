//! The cleaning session: one owned table, one append-only audit log.
//!
//! Stage order is fixed — impute, normalize, deduplicate, analyze — and never
//! depends on data content; a stage with nothing to do contributes its empty
//! result rather than being skipped. Manual mappings run on demand after the
//! automatic stages, each validated and logged independently. External
//! callers interact only through the session's entry points; nothing else
//! mutates the table.

use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use crate::{
    analyze::{self, CategoryProfile},
    dedup,
    error::Result,
    impute::{self, ImputationRecord},
    mapping::{self, MappingOutcome},
    normalize,
    table::{ColumnKind, Table},
};

/// Per-column shape reported when a table enters a session.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub kind: ColumnKind,
    pub missing: usize,
}

/// One observable pipeline action. Append-only; renders to a human-readable
/// line and serializes to JSON for the audit export.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuditEvent {
    Loaded {
        rows: usize,
        columns: Vec<ColumnSummary>,
    },
    Imputed(ImputationRecord),
    Normalized {
        columns: Vec<String>,
    },
    Deduplicated {
        rows_removed: usize,
        rows_remaining: usize,
    },
    Profiled(CategoryProfile),
    Mapped {
        column: String,
        rules: usize,
        unique_before: usize,
        unique_after: usize,
    },
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditEvent::Loaded { rows, columns } => write!(
                f,
                "loaded table with {rows} row(s) and {} column(s)",
                columns.len()
            ),
            AuditEvent::Imputed(record) => write!(
                f,
                "filled {} missing value(s) ({:.2}%) in {} column '{}' with {} '{}'",
                record.missing_count,
                record.missing_percent,
                record.kind,
                record.column,
                record.strategy,
                record.fill_value
            ),
            AuditEvent::Normalized { columns } if columns.is_empty() => {
                write!(f, "text columns already trimmed and lower-cased")
            }
            AuditEvent::Normalized { columns } => write!(
                f,
                "normalized {} text column(s) to trimmed lowercase: {}",
                columns.len(),
                columns.iter().join(", ")
            ),
            AuditEvent::Deduplicated {
                rows_removed,
                rows_remaining,
            } => write!(
                f,
                "removed {rows_removed} duplicate row(s); {rows_remaining} row(s) remain"
            ),
            AuditEvent::Profiled(profile) => write!(
                f,
                "column '{}' has {} unique value(s) across {} row(s) ({})",
                profile.column, profile.unique_values, profile.total_rows, profile.classification
            ),
            AuditEvent::Mapped {
                column,
                rules,
                unique_before,
                unique_after,
            } => write!(
                f,
                "mapped column '{column}' with {rules} rule(s); unique values {unique_before} -> {unique_after}"
            ),
        }
    }
}

/// Owns one table for the duration of a cleaning session.
pub struct CleaningSession {
    table: Table,
    audit: Vec<AuditEvent>,
}

impl CleaningSession {
    pub fn new(table: Table) -> Self {
        let columns = table
            .columns()
            .iter()
            .map(|column| ColumnSummary {
                name: column.name.clone(),
                kind: column.kind(),
                missing: column.missing_count(),
            })
            .collect();
        let loaded = AuditEvent::Loaded {
            rows: table.row_count(),
            columns,
        };
        Self {
            table,
            audit: vec![loaded],
        }
    }

    /// Runs the automatic stages in their fixed order and returns the
    /// category profiles for reporting.
    pub fn run(&mut self) -> Result<Vec<CategoryProfile>> {
        let records = impute::impute(&mut self.table)?;
        self.audit.extend(records.into_iter().map(AuditEvent::Imputed));

        let columns = normalize::normalize(&mut self.table);
        self.audit.push(AuditEvent::Normalized { columns });

        let rows_removed = dedup::deduplicate(&mut self.table);
        self.audit.push(AuditEvent::Deduplicated {
            rows_removed,
            rows_remaining: self.table.row_count(),
        });

        let profiles = analyze::analyze(&self.table);
        self.audit
            .extend(profiles.iter().cloned().map(AuditEvent::Profiled));
        Ok(profiles)
    }

    /// Applies one user-supplied mapping. Validation failures leave both the
    /// table and the audit log untouched; the session stays usable.
    pub fn apply_mapping(&mut self, column: &str, rule_text: &str) -> Result<MappingOutcome> {
        let outcome = mapping::apply_mapping(&mut self.table, column, rule_text)?;
        self.audit.push(AuditEvent::Mapped {
            column: column.to_string(),
            rules: outcome.rules.len(),
            unique_before: outcome.unique_before,
            unique_after: outcome.unique_after,
        });
        Ok(outcome)
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn audit(&self) -> &[AuditEvent] {
        &self.audit
    }

    pub fn into_table(self) -> Table {
        self.table
    }
}
