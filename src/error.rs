use std::path::PathBuf;

use thiserror::Error;

/// Failure taxonomy for loading, cleaning, and exporting tables.
///
/// Mapping failures (`InvalidMappingFormat`, `UnknownColumn`) are recoverable:
/// the table is left unmodified and the session stays usable. The remaining
/// variants abort the operation that raised them.
#[derive(Debug, Error)]
pub enum CleanseError {
    /// Input file kind is not a recognized delimited format.
    #[error("unsupported format '{extension}' for {path:?}: expected a .csv or .tsv file")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// A column has no present values, so no fill value can be computed.
    #[error("column '{column}' has no present values to compute a fill value from")]
    DataQuality { column: String },

    /// Mapping rule text is blank or contains no `old->new` pair.
    #[error("mapping rules '{input}' contain no 'old->new' pair")]
    InvalidMappingFormat { input: String },

    /// Mapping targeted a column that is not a text column of the table.
    #[error("no text column named '{column}' in the table")]
    UnknownColumn { column: String },

    #[error("IO error for {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to decode input as {encoding}")]
    Decode { encoding: &'static str },
}

pub type Result<T> = std::result::Result<T, CleanseError>;
