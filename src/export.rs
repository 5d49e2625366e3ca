//! Writes a cleaned table back out as UTF-8, comma-delimited CSV.

use std::path::{Path, PathBuf};

use crate::{
    error::{CleanseError, Result},
    io_utils,
    table::Table,
};

/// Output path for a cleaned file when none is given: sibling of the input,
/// base name prefixed with `clean_`, extension forced to `.csv`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("data");
    input.with_file_name(format!("clean_{stem}.csv"))
}

/// Writes the header row and every table row; missing cells become empty
/// fields, which round-trip back to missing on reload. `None` or `-` writes
/// to stdout.
pub fn write_table(table: &Table, path: Option<&Path>) -> Result<()> {
    let mut writer = io_utils::open_csv_writer(path)?;
    writer.write_record(table.columns().iter().map(|column| column.name.as_str()))?;
    for row in 0..table.row_count() {
        writer.write_record(
            table
                .columns()
                .iter()
                .map(|column| column.display_at(row).unwrap_or_default()),
        )?;
    }
    writer.flush().map_err(|source| CleanseError::Io {
        path: path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("-")),
        source,
    })
}
