//! User-directed value remapping for a single text column.
//!
//! Rule text looks like `tv->television, pc->computer`. Parsing is lenient by
//! policy: tokens without an arrow are skipped silently, and a later rule for
//! the same source value overwrites the earlier one. Rule text with nothing
//! usable in it is rejected before the table is touched.

use std::collections::HashMap;

use crate::{
    error::{CleanseError, Result},
    normalize::canonicalize,
    table::{Cells, Table},
};

const RULE_ARROW: &str = "->";

/// Source → target substitutions, both sides trimmed and lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingRuleSet {
    rules: HashMap<String, String>,
}

impl MappingRuleSet {
    /// Parses rule text.
    ///
    /// Splits on `,`, then each token containing `->` splits once on its
    /// first arrow. Blank input or input with no arrow at all is
    /// [`CleanseError::InvalidMappingFormat`].
    pub fn parse(rule_text: &str) -> Result<Self> {
        if rule_text.trim().is_empty() || !rule_text.contains(RULE_ARROW) {
            return Err(CleanseError::InvalidMappingFormat {
                input: rule_text.to_string(),
            });
        }
        let mut rules = HashMap::new();
        for token in rule_text.split(',') {
            if let Some((source, target)) = token.split_once(RULE_ARROW) {
                rules.insert(source.trim().to_lowercase(), target.trim().to_lowercase());
            }
        }
        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn target_for(&self, normalized_source: &str) -> Option<&str> {
        self.rules.get(normalized_source).map(String::as_str)
    }
}

/// Result of one mapping application, for observability.
#[derive(Debug, Clone)]
pub struct MappingOutcome {
    pub rules: MappingRuleSet,
    pub unique_before: usize,
    pub unique_after: usize,
}

/// Rewrites every present cell of `column_name` whose canonical form matches
/// a rule source. Cells with no matching rule are left untouched. On any
/// validation failure the table is left unmodified.
pub fn apply_mapping(
    table: &mut Table,
    column_name: &str,
    rule_text: &str,
) -> Result<MappingOutcome> {
    let rules = MappingRuleSet::parse(rule_text)?;
    let index = table
        .text_column_index(column_name)
        .ok_or_else(|| CleanseError::UnknownColumn {
            column: column_name.to_string(),
        })?;

    let column = &mut table.columns_mut()[index];
    let unique_before = column.unique_present();
    if let Cells::Text(values) = column.cells_mut() {
        for cell in values.iter_mut().flatten() {
            let normalized = canonicalize(cell);
            let source = normalized.as_deref().unwrap_or(cell);
            if let Some(target) = rules.target_for(source) {
                *cell = target.to_string();
            }
        }
    }
    let unique_after = table.columns()[index].unique_present();

    Ok(MappingOutcome {
        rules,
        unique_before,
        unique_after,
    })
}
