//! Order scored candidates into a [`RankedResult`].

#![forbid(unsafe_code)]

use collegiate_core::{Candidate, RankedEntry, RankedResult};

/// Order candidates by score, highest first.
///
/// The sort is stable, so candidates with equal scores keep the order they
/// were supplied in (nearest first when fed from the geo filter).
pub fn rank_by_score<'a, I>(scored: I) -> RankedResult<'a>
where
    I: IntoIterator<Item = (Candidate<'a>, f64)>,
{
    let mut entries: Vec<RankedEntry<'a>> = scored
        .into_iter()
        .map(|(candidate, score)| RankedEntry {
            institution: candidate.institution,
            score,
            distance: candidate.distance,
        })
        .collect();
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));
    RankedResult::new(entries)
}

/// Rank candidates when the request carries no preferences.
///
/// Candidates are listed farthest first and scored `position / count` with
/// 1-based positions, so the farthest scores `1 / count` and the nearest
/// scores `1.0`. Equal distances keep their supplied order.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use collegiate_core::{Institution, nearest};
/// use collegiate_scorer::rank_by_distance;
///
/// let table = vec![
///     Institution::new("Near", "A", "AA", Coord { x: 1.0, y: 0.0 }),
///     Institution::new("Far", "B", "BB", Coord { x: 2.0, y: 0.0 }),
/// ];
/// let candidates = nearest(&table, Coord { x: 0.0, y: 0.0 }, 2)?;
/// let ranked = rank_by_distance(candidates);
/// assert_eq!(ranked.names(), vec!["Far", "Near"]);
/// assert_eq!(ranked.scores(), vec![0.5, 1.0]);
/// # Ok::<(), collegiate_core::InvalidArgument>(())
/// ```
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "positional scores divide small candidate counts"
)]
pub fn rank_by_distance(mut candidates: Vec<Candidate<'_>>) -> RankedResult<'_> {
    candidates.sort_by(|a, b| b.distance.total_cmp(&a.distance));
    let count = candidates.len() as f64;
    let entries = candidates
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| RankedEntry {
            institution: candidate.institution,
            score: (index + 1) as f64 / count,
            distance: candidate.distance,
        })
        .collect();
    RankedResult::new(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use collegiate_core::Institution;
    use collegiate_core::test_support::institution_at;
    use rstest::{fixture, rstest};

    #[fixture]
    fn table() -> Vec<Institution> {
        vec![
            institution_at("school0", 0.0, 0.0),
            institution_at("school1", 1.0, 1.0),
            institution_at("school2", 2.0, 2.0),
        ]
    }

    fn candidates<'a>(table: &'a [Institution], distances: &[f64]) -> Vec<Candidate<'a>> {
        table
            .iter()
            .zip(distances)
            .map(|(institution, distance)| Candidate {
                institution,
                distance: *distance,
            })
            .collect()
    }

    #[rstest]
    fn score_order_is_descending(table: Vec<Institution>) {
        let found = candidates(&table, &[0.0, 1.0, 2.0]);
        let ranked = rank_by_score(found.into_iter().zip([0.2, 0.9, 0.5]));
        assert_eq!(ranked.names(), vec!["school1", "school2", "school0"]);
        assert_eq!(ranked.scores(), vec![0.9, 0.5, 0.2]);
    }

    #[rstest]
    fn equal_scores_keep_supplied_order(table: Vec<Institution>) {
        let found = candidates(&table, &[0.0, 1.0, 2.0]);
        let ranked = rank_by_score(found.into_iter().zip([0.5, 0.5, 0.5]));
        assert_eq!(ranked.names(), vec!["school0", "school1", "school2"]);
    }

    #[rstest]
    fn equal_distances_keep_supplied_order(table: Vec<Institution>) {
        let ranked = rank_by_distance(candidates(&table, &[1.0, 1.0, 0.5]));
        assert_eq!(ranked.names(), vec!["school0", "school1", "school2"]);
    }

    #[rstest]
    fn empty_candidates_rank_to_empty_result() {
        assert!(rank_by_distance(Vec::new()).is_empty());
        assert!(rank_by_score(Vec::<(Candidate<'_>, f64)>::new()).is_empty());
    }
}
