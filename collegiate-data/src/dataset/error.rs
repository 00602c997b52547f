//! Errors raised while loading the institution table.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while loading the institution table.
///
/// Every variant is fatal: the table is loaded once at startup and no query
/// can run without it.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The table file could not be opened.
    #[error("failed to open dataset at {path}")]
    Open {
        /// Requested table path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The path exists but is not a regular file.
    #[error("dataset path {path} is not a file")]
    NotAFile {
        /// Requested table path.
        path: Utf8PathBuf,
    },
    /// The CSV stream could not be read.
    #[error("failed to read dataset")]
    Read {
        /// Source error from `csv`.
        #[source]
        source: csv::Error,
    },
    /// A required column is absent from the header row.
    #[error("dataset is missing required column '{column}'")]
    MissingColumn {
        /// Name of the absent column.
        column: String,
    },
    /// A numeric cell was empty, unparseable or not finite.
    #[error("invalid number '{value}' in column '{column}' on line {line}")]
    InvalidNumber {
        /// One-based line number in the source.
        line: u64,
        /// Column of the offending cell.
        column: String,
        /// Raw cell contents.
        value: String,
    },
    /// The table has a header but no rows.
    #[error("dataset contains no institutions")]
    Empty,
}
