//! Planar nearest-neighbour retrieval of candidate institutions.
//!
//! Distances are Euclidean on raw `(latitude, longitude)` degrees. This is an
//! approximation that ignores the Earth's curvature and the shrinking length
//! of a longitude degree away from the equator; it is adequate for coarse
//! proximity ranking within a country-sized area, not for measuring
//! distances.

use geo::Coord;
use thiserror::Error;

use crate::Institution;

/// Request arguments rejected before any computation takes place.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidArgument {
    /// The requested candidate count was zero or negative.
    #[error("k must be positive, got {k}")]
    NonPositiveK {
        /// Value supplied by the caller.
        k: i64,
    },
    /// The query point had a NaN or infinite coordinate.
    #[error("point ({lat}, {lng}) must have finite coordinates")]
    NonFinitePoint {
        /// Latitude supplied by the caller.
        lat: f64,
        /// Longitude supplied by the caller.
        lng: f64,
    },
    /// A categorical preference named a category outside its group.
    #[error("unknown {group} category '{value}'")]
    UnknownCategory {
        /// Group the category was requested for.
        group: &'static str,
        /// Label supplied by the caller.
        value: String,
    },
}

/// An institution selected by the geo filter for a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    /// The selected institution.
    pub institution: &'a Institution,
    /// Planar distance from the query point in degrees.
    pub distance: f64,
}

/// Return the `k` institutions closest to `point`, nearest first.
///
/// Ties in distance keep table order. `k` larger than the table is clamped
/// to the table size.
///
/// # Errors
/// Returns [`InvalidArgument::NonPositiveK`] when `k <= 0` and
/// [`InvalidArgument::NonFinitePoint`] when either coordinate is not finite.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use collegiate_core::{Institution, nearest};
///
/// let table = vec![
///     Institution::new("Far", "A", "AA", Coord { x: 3.0, y: 4.0 }),
///     Institution::new("Near", "B", "BB", Coord { x: 1.0, y: 0.0 }),
/// ];
/// let found = nearest(&table, Coord { x: 0.0, y: 0.0 }, 1)?;
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].institution.name, "Near");
/// # Ok::<(), collegiate_core::InvalidArgument>(())
/// ```
pub fn nearest(
    institutions: &[Institution],
    point: Coord<f64>,
    k: i64,
) -> Result<Vec<Candidate<'_>>, InvalidArgument> {
    if k <= 0 {
        return Err(InvalidArgument::NonPositiveK { k });
    }
    if !point.x.is_finite() || !point.y.is_finite() {
        return Err(InvalidArgument::NonFinitePoint {
            lat: point.y,
            lng: point.x,
        });
    }
    let limit = usize::try_from(k).map_or(institutions.len(), |k| k.min(institutions.len()));

    let mut candidates: Vec<Candidate<'_>> = institutions
        .iter()
        .map(|institution| Candidate {
            institution,
            distance: planar_distance(institution.location, point),
        })
        .collect();
    // Stable sort keeps table order for equal distances.
    candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    candidates.truncate(limit);
    Ok(candidates)
}

/// Euclidean distance between two coordinates in degree space.
pub fn planar_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let delta = a - b;
    delta.x.hypot(delta.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn institution(name: &str, lat: f64, lng: f64) -> Institution {
        Institution::new(name, "City", "ST", Coord { x: lng, y: lat })
    }

    #[fixture]
    fn table() -> Vec<Institution> {
        vec![
            institution("e", 5.0, 0.0),
            institution("b", 0.0, 2.0),
            institution("d", -4.0, 0.0),
            institution("a", 1.0, 0.0),
            institution("c", 3.0, 0.0),
        ]
    }

    fn names(candidates: &[Candidate<'_>]) -> Vec<String> {
        candidates
            .iter()
            .map(|c| c.institution.name.clone())
            .collect()
    }

    #[rstest]
    fn returns_k_nearest_in_ascending_distance(table: Vec<Institution>) {
        let found = nearest(&table, Coord { x: 0.0, y: 0.0 }, 3).expect("valid query");
        assert_eq!(names(&found), vec!["a", "b", "c"]);
        let distances: Vec<f64> = found.iter().map(|c| c.distance).collect();
        assert_eq!(distances, vec![1.0, 2.0, 3.0]);
    }

    #[rstest]
    fn clamps_k_to_table_size(table: Vec<Institution>) {
        let found = nearest(&table, Coord { x: 0.0, y: 0.0 }, 99).expect("valid query");
        assert_eq!(names(&found), vec!["a", "b", "c", "d", "e"]);
    }

    #[rstest]
    fn ties_keep_table_order() {
        let table = vec![
            institution("north", 1.0, 0.0),
            institution("south", -1.0, 0.0),
            institution("east", 0.0, 1.0),
        ];
        let found = nearest(&table, Coord { x: 0.0, y: 0.0 }, 3).expect("valid query");
        assert_eq!(names(&found), vec!["north", "south", "east"]);
    }

    #[rstest]
    fn repeated_queries_are_deterministic(table: Vec<Institution>) {
        let point = Coord { x: 0.3, y: 0.7 };
        let first = nearest(&table, point, 4).expect("valid query");
        let second = nearest(&table, point, 4).expect("valid query");
        assert_eq!(first, second);
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    fn rejects_non_positive_k(table: Vec<Institution>, #[case] k: i64) {
        let err = nearest(&table, Coord { x: 0.0, y: 0.0 }, k).expect_err("invalid k");
        assert_eq!(err, InvalidArgument::NonPositiveK { k });
    }

    #[rstest]
    #[case(Coord { x: f64::NAN, y: 0.0 })]
    #[case(Coord { x: 0.0, y: f64::INFINITY })]
    fn rejects_non_finite_point(table: Vec<Institution>, #[case] point: Coord<f64>) {
        let err = nearest(&table, point, 1).expect_err("invalid point");
        assert!(matches!(err, InvalidArgument::NonFinitePoint { .. }));
    }

    #[rstest]
    fn empty_table_yields_no_candidates() {
        let found = nearest(&[], Coord { x: 0.0, y: 0.0 }, 2).expect("valid query");
        assert!(found.is_empty());
    }
}
