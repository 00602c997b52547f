//! Map preferences and candidates into a shared, comparable vector space.
//!
//! Numeric features are standardised against the dataset-wide
//! [`ColumnStatistics`]. Categorical preferences become a fixed target of
//! `1.0` on the preference side and a rank-scaled share on the candidate
//! side, so "how dominant is this category at this institution" is compared
//! on the same `[0, 1]` scale for every institution.

#![forbid(unsafe_code)]

use collegiate_core::{Candidate, Category, CategoryShares, ColumnStatistics, Preferences};

/// Value a degenerate share row (all shares equal) is mapped to.
pub const DEGENERATE_RANK: f64 = 0.5;

/// Preference-side value for a categorical preference.
pub const CATEGORY_TARGET: f64 = 1.0;

/// Ordered `(feature name, standardised value)` pairs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedVector {
    entries: Vec<(String, f64)>,
}

impl NormalizedVector {
    /// Labels in vector order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Values in vector order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, value)| *value).collect()
    }

    /// Ordered entries.
    #[must_use]
    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    /// Number of dimensions.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report whether no preference survived normalisation.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, name: impl Into<String>, value: f64) {
        self.entries.push((name.into(), value));
    }
}

/// Preference vector plus one comparison vector per candidate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Normalized {
    /// Standardised preference vector.
    pub preference: NormalizedVector,
    /// Candidate vectors, in candidate order, aligned with `preference`.
    pub candidates: Vec<NormalizedVector>,
}

/// Normalise `preferences` and every candidate into aligned vectors.
///
/// Numeric features come first in request order, followed by the
/// field-of-study dimension and then the demographic dimension. A numeric
/// feature unknown to `statistics`, or whose standard deviation is zero, is
/// dropped from every vector.
///
/// # Examples
/// ```
/// use collegiate_core::{ColumnStatistic, ColumnStatistics, Preferences};
/// use collegiate_scorer::normalize;
///
/// let statistics = ColumnStatistics::from_entries([(
///     "Average Cost of Attendance".to_owned(),
///     ColumnStatistic { mean: 50_000.0, std_dev: 10_000.0 },
/// )]);
/// let preferences = Preferences::new()
///     .with_feature("Average Cost of Attendance", 60_000.0)
///     .with_feature("Unknown", 1.0);
///
/// let normalized = normalize(&preferences, &[], &statistics);
/// assert_eq!(normalized.preference.values(), vec![1.0]);
/// assert!(normalized.candidates.is_empty());
/// ```
#[must_use]
pub fn normalize(
    preferences: &Preferences,
    candidates: &[Candidate<'_>],
    statistics: &ColumnStatistics,
) -> Normalized {
    let mut preference = NormalizedVector::default();
    let mut rows = vec![NormalizedVector::default(); candidates.len()];

    for (name, wanted) in &preferences.features {
        let Some(standardised) = statistics.z_score(name, *wanted) else {
            log::debug!("dropping preference '{name}': no usable statistics");
            continue;
        };
        preference.push(name.as_str(), standardised);
        for (row, candidate) in rows.iter_mut().zip(candidates) {
            let value = candidate
                .institution
                .feature(name)
                .and_then(|raw| statistics.z_score(name, raw))
                .unwrap_or(0.0);
            row.push(name.as_str(), value);
        }
    }

    if let Some(field) = preferences.field_of_study {
        preference.push(field.label(), CATEGORY_TARGET);
        for (row, candidate) in rows.iter_mut().zip(candidates) {
            row.push(
                field.label(),
                rank_transform(&candidate.institution.field_of_study, field),
            );
        }
    }

    if let Some(group) = preferences.demographic {
        preference.push(group.label(), CATEGORY_TARGET);
        for (row, candidate) in rows.iter_mut().zip(candidates) {
            row.push(
                group.label(),
                rank_transform(&candidate.institution.demographic, group),
            );
        }
    }

    Normalized {
        preference,
        candidates: rows,
    }
}

/// Dense rank of every value: equal values share a rank, the smallest value
/// has rank 1 and ranks have no gaps.
///
/// # Examples
/// ```
/// use collegiate_scorer::dense_ranks;
///
/// assert_eq!(dense_ranks(&[0.3, 0.1, 0.3, 0.2]), vec![3, 1, 3, 2]);
/// ```
#[must_use]
pub fn dense_ranks(values: &[f64]) -> Vec<usize> {
    let mut distinct = values.to_vec();
    distinct.sort_by(f64::total_cmp);
    distinct.dedup_by(|a, b| a.total_cmp(b).is_eq());
    values
        .iter()
        .map(|value| {
            distinct
                .binary_search_by(|probe| probe.total_cmp(value))
                .map_or(0, |index| index + 1)
        })
        .collect()
}

/// Scaled dense rank of `target` among the shares of its group.
///
/// The rank is scaled with `(rank - min) / (max - min)` into `[0, 1]`. When
/// every share is equal, or `target` has no share, the result is
/// [`DEGENERATE_RANK`].
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "rank scaling divides small rank counts as floats"
)]
#[must_use]
pub fn rank_transform<C: Category>(shares: &CategoryShares<C>, target: C) -> f64 {
    let values = shares.values();
    let ranks = dense_ranks(&values);
    let Some(position) = shares.iter().position(|(category, _)| category == target) else {
        return DEGENERATE_RANK;
    };
    let (Some(&rank), Some(&min), Some(&max)) = (
        ranks.get(position),
        ranks.iter().min(),
        ranks.iter().max(),
    ) else {
        return DEGENERATE_RANK;
    };
    if max == min {
        return DEGENERATE_RANK;
    }
    (rank - min) as f64 / (max - min) as f64
}
