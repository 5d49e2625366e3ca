//! The `clean` command: load, run the pipeline, apply any requested
//! mappings, report the audit trail, and export the cleaned CSV.

use std::fs::File;

use anyhow::{anyhow, Context, Result};
use log::{info, warn};

use crate::{
    cli::CleanArgs,
    error::CleanseError,
    export, ingest, io_utils,
    pipeline::CleaningSession,
    render,
    table::Table,
};

pub fn execute(args: &CleanArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    info!(
        "Cleaning '{}' (delimiter '{}')",
        args.input.display(),
        crate::printable_delimiter(delimiter)
    );

    let table = ingest::load_table(&args.input, delimiter, encoding)
        .with_context(|| format!("Loading table from {:?}", args.input))?;
    print_shape_report(&table);

    let mut session = CleaningSession::new(table);
    session
        .run()
        .with_context(|| format!("Cleaning {:?}", args.input))?;

    for map in &args.maps {
        let (column, rules) = split_map_argument(map)?;
        match session.apply_mapping(column, rules) {
            Ok(outcome) => info!(
                "Applied {} mapping rule(s) to column '{}'",
                outcome.rules.len(),
                column
            ),
            Err(
                err @ (CleanseError::InvalidMappingFormat { .. } | CleanseError::UnknownColumn { .. }),
            ) => {
                warn!("Skipping mapping '{map}': {err}");
            }
            Err(err) => return Err(err.into()),
        }
    }

    for event in session.audit() {
        info!("{event}");
    }

    if let Some(path) = &args.audit_json {
        let file = File::create(path).with_context(|| format!("Creating audit log {path:?}"))?;
        serde_json::to_writer_pretty(file, session.audit()).context("Writing audit log JSON")?;
        info!("Wrote audit log to {path:?}");
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| export::default_output_path(&args.input));
    export::write_table(session.table(), Some(&output))
        .with_context(|| format!("Writing cleaned table to {output:?}"))?;
    info!(
        "Wrote cleaned table with {} row(s) to {:?}",
        session.table().row_count(),
        output
    );
    Ok(())
}

/// Shape report matching the load summary: one line per column with its
/// kind and missing-cell count.
fn print_shape_report(table: &Table) {
    let headers = vec![
        "column".to_string(),
        "kind".to_string(),
        "missing".to_string(),
    ];
    let rows = table
        .columns()
        .iter()
        .map(|column| {
            vec![
                column.name.clone(),
                column.kind().to_string(),
                column.missing_count().to_string(),
            ]
        })
        .collect::<Vec<_>>();
    render::print_table(&headers, &rows);
}

fn split_map_argument(raw: &str) -> Result<(&str, &str)> {
    raw.split_once('=')
        .map(|(column, rules)| (column.trim(), rules))
        .ok_or_else(|| anyhow!("--map expects 'column=old->new, ...', got '{raw}'"))
}
