//! Test-only, in-memory `InstitutionStore` and builders used by unit and
//! behaviour tests.

use geo::Coord;

use crate::{
    CategoryShares, ColumnStatistic, ColumnStatistics, Demographic, FieldOfStudy, Institution,
    InstitutionStore,
};

/// In-memory `InstitutionStore` implementation used in tests.
///
/// Statistics are computed over every institution at construction, as a
/// loaded dataset would.
#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    institutions: Vec<Institution>,
    statistics: ColumnStatistics,
}

impl MemoryStore {
    /// Create a store from institutions, computing statistics for every
    /// feature present on the first institution.
    pub fn with_institutions<I>(institutions: I) -> Self
    where
        I: IntoIterator<Item = Institution>,
    {
        let institutions: Vec<Institution> = institutions.into_iter().collect();
        let names: Vec<String> = institutions
            .first()
            .map(|first| first.features.keys().cloned().collect())
            .unwrap_or_default();
        let statistics = ColumnStatistics::from_entries(names.into_iter().filter_map(|name| {
            let values: Vec<f64> = institutions
                .iter()
                .filter_map(|institution| institution.feature(&name))
                .collect();
            ColumnStatistic::from_values(&values).map(|stat| (name, stat))
        }));
        Self {
            institutions,
            statistics,
        }
    }

    /// Replace the computed statistics with fixed ones.
    #[must_use]
    pub fn with_statistics(mut self, statistics: ColumnStatistics) -> Self {
        self.statistics = statistics;
        self
    }
}

impl InstitutionStore for MemoryStore {
    fn institutions(&self) -> &[Institution] {
        &self.institutions
    }

    fn statistics(&self) -> &ColumnStatistics {
        &self.statistics
    }
}

/// Build an institution at `(lat, lng)` with no features.
pub fn institution_at(name: &str, lat: f64, lng: f64) -> Institution {
    Institution::new(name, "Testville", "TS", Coord { x: lng, y: lat })
}

/// Field-of-study shares as `(STEM, Arts and Humanities)`.
pub fn field_shares(stem: f64, arts: f64) -> CategoryShares<FieldOfStudy> {
    CategoryShares::new([
        (FieldOfStudy::Stem, stem),
        (FieldOfStudy::ArtsAndHumanities, arts),
    ])
}

/// Demographic shares in canonical category order.
pub fn demographic_shares(values: [f64; 6]) -> CategoryShares<Demographic> {
    CategoryShares::new(
        <Demographic as crate::Category>::ALL
            .iter()
            .copied()
            .zip(values),
    )
}
