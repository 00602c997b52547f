//! Typed match requests.
//!
//! A request either asks for nearby institutions only
//! ([`MatchRequest::GeoOnly`]) or carries preferences to score them against
//! ([`MatchRequest::Preferences`]). Callers pick the variant explicitly, or
//! let [`MatchRequest::new`] choose it from whether any preference is set.

use geo::Coord;

use crate::{Category, Demographic, FieldOfStudy, InvalidArgument};

/// Desired attributes of an institution.
///
/// Numeric features keep the order the caller supplied them in; that order
/// determines the order of the normalised preference vector. Feature names
/// unknown to the dataset are tolerated and dropped during normalisation.
///
/// # Examples
/// ```
/// use collegiate_core::{FieldOfStudy, Preferences};
///
/// let preferences = Preferences::new()
///     .with_feature("Average Cost of Attendance", 54_518.5)
///     .with_field_of_study(FieldOfStudy::Stem);
/// assert!(!preferences.is_empty());
/// assert!(Preferences::new().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Preferences {
    /// Desired raw values keyed by numeric feature name.
    pub features: Vec<(String, f64)>,
    /// Preferred field of study, if any.
    pub field_of_study: Option<FieldOfStudy>,
    /// Preferred demographic group, if any.
    pub demographic: Option<Demographic>,
}

impl Preferences {
    /// Construct an empty set of preferences.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a numeric feature preference.
    #[must_use]
    pub fn with_feature(mut self, name: impl Into<String>, value: f64) -> Self {
        self.set_feature(name, value);
        self
    }

    /// Insert or update a numeric feature preference in place.
    ///
    /// Updating an existing feature keeps its original position.
    pub fn set_feature(&mut self, name: impl Into<String>, value: f64) {
        let key = name.into();
        match self.features.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.features.push((key, value)),
        }
    }

    /// Set the preferred field of study.
    #[must_use]
    pub fn with_field_of_study(mut self, field: FieldOfStudy) -> Self {
        self.field_of_study = Some(field);
        self
    }

    /// Set the preferred demographic group.
    #[must_use]
    pub fn with_demographic(mut self, group: Demographic) -> Self {
        self.demographic = Some(group);
        self
    }

    /// Parse and set the field of study from its label.
    ///
    /// # Errors
    /// Returns [`InvalidArgument::UnknownCategory`] for unknown labels.
    pub fn with_field_of_study_label(self, label: &str) -> Result<Self, InvalidArgument> {
        Ok(self.with_field_of_study(parse_category(label)?))
    }

    /// Parse and set the demographic group from its label.
    ///
    /// # Errors
    /// Returns [`InvalidArgument::UnknownCategory`] for unknown labels.
    pub fn with_demographic_label(self, label: &str) -> Result<Self, InvalidArgument> {
        Ok(self.with_demographic(parse_category(label)?))
    }

    /// Report whether no preference of any kind is set.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty() && self.field_of_study.is_none() && self.demographic.is_none()
    }
}

fn parse_category<C: Category>(label: &str) -> Result<C, InvalidArgument> {
    C::from_label(label).ok_or_else(|| InvalidArgument::UnknownCategory {
        group: C::GROUP,
        value: label.to_owned(),
    })
}

/// Proximity-only request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoOnlyRequest {
    /// Query point (`x = longitude`, `y = latitude`).
    pub point: Coord<f64>,
    /// Number of candidates to return.
    pub k: i64,
}

/// Request scoring nearby institutions against preferences.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceRequest {
    /// Query point (`x = longitude`, `y = latitude`).
    pub point: Coord<f64>,
    /// Number of candidates to consider.
    pub k: i64,
    /// Desired attributes.
    pub preferences: Preferences,
}

/// A request to the match engine.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchRequest {
    /// Rank by proximity only.
    GeoOnly(GeoOnlyRequest),
    /// Rank by similarity to preferences.
    Preferences(PreferenceRequest),
}

impl MatchRequest {
    /// Build a request, choosing the geo-only variant when `preferences`
    /// is empty.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use collegiate_core::{MatchRequest, Preferences};
    ///
    /// let request = MatchRequest::new(Coord { x: -122.1, y: 37.4 }, 10, Preferences::new());
    /// assert!(matches!(request, MatchRequest::GeoOnly(_)));
    /// ```
    pub fn new(point: Coord<f64>, k: i64, preferences: Preferences) -> Self {
        if preferences.is_empty() {
            Self::GeoOnly(GeoOnlyRequest { point, k })
        } else {
            Self::Preferences(PreferenceRequest {
                point,
                k,
                preferences,
            })
        }
    }

    /// Query point of the request.
    pub const fn point(&self) -> Coord<f64> {
        match self {
            Self::GeoOnly(request) => request.point,
            Self::Preferences(request) => request.point,
        }
    }

    /// Requested candidate count.
    pub const fn k(&self) -> i64 {
        match self {
            Self::GeoOnly(request) => request.k,
            Self::Preferences(request) => request.k,
        }
    }
}
