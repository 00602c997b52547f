//! Institutions: the rows of the deduplicated dataset.

use std::collections::BTreeMap;

use geo::Coord;

use crate::{CategoryShares, Demographic, FieldOfStudy};

/// A college or university from the cleaned dataset.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. Numeric
/// features hold raw (unstandardised) values keyed by column name.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use collegiate_core::Institution;
///
/// let institution = Institution::new("Example College", "Springfield", "IL", Coord { x: -89.6, y: 39.8 })
///     .with_feature("Total Enrollment", 4200.0);
///
/// assert_eq!(institution.feature("Total Enrollment"), Some(4200.0));
/// assert_eq!(institution.latitude(), 39.8);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Institution {
    /// Institution name.
    pub name: String,
    /// City the institution is located in.
    pub city: String,
    /// Two-letter state abbreviation.
    pub state: String,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Raw numeric feature values keyed by column name.
    pub features: BTreeMap<String, f64>,
    /// Degree shares by field of study.
    pub field_of_study: CategoryShares<FieldOfStudy>,
    /// Degree shares by demographic group.
    pub demographic: CategoryShares<Demographic>,
}

impl Institution {
    /// Construct an institution without features or category shares.
    pub fn new(
        name: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        location: Coord<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
            state: state.into(),
            location,
            features: BTreeMap::new(),
            field_of_study: CategoryShares::default(),
            demographic: CategoryShares::default(),
        }
    }

    /// Add a numeric feature while returning `self` for chaining.
    #[must_use]
    pub fn with_feature(mut self, name: impl Into<String>, value: f64) -> Self {
        self.features.insert(name.into(), value);
        self
    }

    /// Replace the field-of-study shares.
    #[must_use]
    pub fn with_field_of_study(mut self, shares: CategoryShares<FieldOfStudy>) -> Self {
        self.field_of_study = shares;
        self
    }

    /// Replace the demographic shares.
    #[must_use]
    pub fn with_demographic(mut self, shares: CategoryShares<Demographic>) -> Self {
        self.demographic = shares;
        self
    }

    /// Return the raw value of a numeric feature.
    pub fn feature(&self, name: &str) -> Option<f64> {
        self.features.get(name).copied()
    }

    /// Latitude in degrees.
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }
}
