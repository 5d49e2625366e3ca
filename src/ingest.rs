//! Loads a delimited file into a [`Table`] with per-column kind inference.
//!
//! A column is numeric when every present value parses as `f64`; any other
//! present value makes the whole column text. Empty fields decode to the
//! missing marker, never to `0` or `""`. The kind is fixed here and never
//! changes for the lifetime of the table.

use std::path::Path;

use encoding_rs::Encoding;

use crate::{
    error::{CleanseError, Result},
    io_utils,
    table::{Column, Table},
};

const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "tsv"];

/// Rejects anything that is not a delimited text file.
///
/// The canonical rejected case is a spreadsheet (`.xlsx`); no binary
/// spreadsheet reader is embedded, so the load fails before any bytes are
/// parsed. Reading from stdin (`-`) is always allowed.
pub fn ensure_supported(path: &Path) -> Result<()> {
    if io_utils::is_dash(path) {
        return Ok(());
    }
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    if SUPPORTED_EXTENSIONS
        .iter()
        .any(|candidate| extension.eq_ignore_ascii_case(candidate))
    {
        Ok(())
    } else {
        Err(CleanseError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension: extension.to_string(),
        })
    }
}

/// Reads the whole file and returns a fully-loaded table.
pub fn load_table(path: &Path, delimiter: u8, encoding: &'static Encoding) -> Result<Table> {
    ensure_supported(path)?;
    let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
    let headers = io_utils::reader_headers(&mut reader, encoding)?;

    let mut raw_columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for record in reader.byte_records() {
        let record = record?;
        let decoded = io_utils::decode_record(&record, encoding)?;
        for (idx, field) in decoded.into_iter().enumerate() {
            let cell = if field.is_empty() { None } else { Some(field) };
            raw_columns[idx].push(cell);
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw_columns)
        .map(|(name, raw)| build_column(name, raw))
        .collect();
    Ok(Table::new(columns))
}

fn build_column(name: String, raw: Vec<Option<String>>) -> Column {
    let numeric = raw
        .iter()
        .flatten()
        .all(|value| value.trim().parse::<f64>().is_ok());
    if numeric {
        let values = raw
            .into_iter()
            .map(|cell| cell.map(|value| value.trim().parse::<f64>().expect("value checked numeric")))
            .collect();
        Column::numeric(name, values)
    } else {
        Column::text(name, raw)
    }
}
