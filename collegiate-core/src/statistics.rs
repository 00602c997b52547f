//! Frozen per-column statistics used to standardise numeric features.
//!
//! Statistics are computed once over the whole dataset when the store is
//! built. Computing them over a query's candidate subset would leak the
//! subset into the normalisation, so no API here accepts candidates.

use std::collections::BTreeMap;

/// Mean and sample standard deviation of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStatistic {
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (`n - 1` denominator).
    pub std_dev: f64,
}

impl ColumnStatistic {
    /// Compute the statistic for a column of values.
    ///
    /// Returns `None` for an empty column. A single-value column has a
    /// standard deviation of `0.0`.
    ///
    /// # Examples
    /// ```
    /// use collegiate_core::ColumnStatistic;
    ///
    /// let stat = ColumnStatistic::from_values(&[2.0, 4.0, 6.0]).unwrap();
    /// assert_eq!(stat.mean, 4.0);
    /// assert_eq!(stat.std_dev, 2.0);
    /// ```
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let count = values.len() as f64;
        let mean = values.iter().sum::<f64>() / count;
        if values.len() < 2 {
            return Some(Self { mean, std_dev: 0.0 });
        }
        let squared: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
        let std_dev = (squared / (count - 1.0)).sqrt();
        Some(Self { mean, std_dev })
    }

    /// Standardise `value` against this column.
    ///
    /// Returns `None` when the standard deviation is zero or not finite, so
    /// callers can drop the feature instead of dividing by zero.
    pub fn z_score(&self, value: f64) -> Option<f64> {
        if self.std_dev == 0.0 || !self.std_dev.is_finite() {
            return None;
        }
        Some((value - self.mean) / self.std_dev)
    }
}

/// Statistics for every recognised numeric feature, keyed by column name.
///
/// # Examples
/// ```
/// use collegiate_core::{ColumnStatistic, ColumnStatistics};
///
/// let stats = ColumnStatistics::from_entries([(
///     "Average Cost of Attendance".to_owned(),
///     ColumnStatistic { mean: 50_000.0, std_dev: 10_000.0 },
/// )]);
/// assert_eq!(stats.z_score("Average Cost of Attendance", 60_000.0), Some(1.0));
/// assert_eq!(stats.z_score("Unknown", 1.0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnStatistics {
    columns: BTreeMap<String, ColumnStatistic>,
}

impl ColumnStatistics {
    /// Build statistics from precomputed entries.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, ColumnStatistic)>,
    {
        Self {
            columns: entries.into_iter().collect(),
        }
    }

    /// Compute statistics for each named column of values.
    ///
    /// Empty columns are skipped.
    pub fn compute<'a, I>(columns: I) -> Self
    where
        I: IntoIterator<Item = (String, &'a [f64])>,
    {
        Self {
            columns: columns
                .into_iter()
                .filter_map(|(name, values)| {
                    ColumnStatistic::from_values(values).map(|stat| (name, stat))
                })
                .collect(),
        }
    }

    /// Return the statistic for a column.
    pub fn get(&self, column: &str) -> Option<&ColumnStatistic> {
        self.columns.get(column)
    }

    /// Report whether statistics exist for `column`.
    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Standardise `value` against the named column.
    ///
    /// Returns `None` for unknown columns and for columns whose standard
    /// deviation is zero.
    pub fn z_score(&self, column: &str, value: f64) -> Option<f64> {
        self.get(column).and_then(|stat| stat.z_score(value))
    }

    /// Iterate over column names in sorted order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Number of columns with statistics.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Report whether no statistics were computed.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
