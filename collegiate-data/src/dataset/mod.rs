//! CSV-backed [`InstitutionStore`].
//!
//! The table is read once, deduplicated by `(name, city, state)` and frozen
//! together with the statistics of its numeric feature columns. Nothing is
//! mutated after [`InstitutionTable::load`] returns, so one table can back
//! any number of concurrent queries.
//!
//! # Example
//!
//! ```no_run
//! use camino::Utf8Path;
//! use collegiate_core::InstitutionStore;
//! use collegiate_data::dataset::{DatasetSchema, InstitutionTable};
//!
//! let table = InstitutionTable::load(Utf8Path::new("data/combined_filtered.csv"), &DatasetSchema::default())?;
//! println!("{} institutions", table.len());
//! # Ok::<(), collegiate_data::dataset::DatasetError>(())
//! ```

mod accumulator;
mod error;
mod schema;

use std::io::Read;

use camino::Utf8Path;
use collegiate_core::{ColumnStatistics, Institution, InstitutionStore};

use crate::fs::{file_is_file, open_utf8_file};

use accumulator::{ColumnIndex, DedupAccumulator};
pub use error::DatasetError;
pub use schema::{DEFAULT_FEATURE_COLUMNS, DatasetSchema};

/// Deduplicated institutions and their frozen column statistics.
#[derive(Debug, Clone)]
pub struct InstitutionTable {
    institutions: Vec<Institution>,
    statistics: ColumnStatistics,
    source_rows: usize,
}

impl InstitutionTable {
    /// Load and deduplicate the table at `path`.
    ///
    /// # Errors
    /// Returns [`DatasetError`] when the file is missing, is not a regular
    /// file, lacks a required column, holds an unparseable numeric cell or
    /// has no rows.
    pub fn load(path: &Utf8Path, schema: &DatasetSchema) -> Result<Self, DatasetError> {
        let is_file = file_is_file(path).map_err(|source| DatasetError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        if !is_file {
            return Err(DatasetError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        let file = open_utf8_file(path).map_err(|source| DatasetError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file, schema)?;
        log::info!(
            "loaded {} institutions from {} rows in {path}",
            table.len(),
            table.source_rows
        );
        Ok(table)
    }

    /// Read a table from any CSV source.
    ///
    /// # Errors
    /// See [`InstitutionTable::load`].
    pub fn from_reader<R: Read>(reader: R, schema: &DatasetSchema) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        let headers = csv_reader
            .headers()
            .map_err(|source| DatasetError::Read { source })?
            .clone();
        let columns = ColumnIndex::resolve(&headers, schema)?;

        let mut accumulator = DedupAccumulator::default();
        accumulator.consume(csv_reader.records(), &columns)?;
        let source_rows = accumulator.rows();
        let institutions = accumulator.finish(schema);
        log::debug!(
            "deduplicated {source_rows} rows into {} institutions",
            institutions.len()
        );
        Self::build(institutions, schema, source_rows)
    }

    /// Wrap already-deduplicated institutions, computing statistics for the
    /// schema's feature columns.
    ///
    /// # Errors
    /// Returns [`DatasetError::Empty`] when `institutions` is empty.
    pub fn from_institutions(
        institutions: Vec<Institution>,
        schema: &DatasetSchema,
    ) -> Result<Self, DatasetError> {
        let rows = institutions.len();
        Self::build(institutions, schema, rows)
    }

    fn build(
        institutions: Vec<Institution>,
        schema: &DatasetSchema,
        source_rows: usize,
    ) -> Result<Self, DatasetError> {
        if institutions.is_empty() {
            return Err(DatasetError::Empty);
        }
        let columns: Vec<(String, Vec<f64>)> = schema
            .features
            .iter()
            .map(|feature| {
                let values = institutions
                    .iter()
                    .filter_map(|institution| institution.feature(feature))
                    .collect();
                (feature.clone(), values)
            })
            .collect();
        let statistics = ColumnStatistics::compute(
            columns
                .iter()
                .map(|(name, values)| (name.clone(), values.as_slice())),
        );
        Ok(Self {
            institutions,
            statistics,
            source_rows,
        })
    }

    /// Number of rows read before deduplication.
    #[must_use]
    pub const fn source_rows(&self) -> usize {
        self.source_rows
    }
}

impl InstitutionStore for InstitutionTable {
    fn institutions(&self) -> &[Institution] {
        &self.institutions
    }

    fn statistics(&self) -> &ColumnStatistics {
        &self.statistics
    }
}
