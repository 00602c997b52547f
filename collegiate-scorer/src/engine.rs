//! The match pipeline: geo filter, normaliser, similarity scorer, ranker.

#![forbid(unsafe_code)]

use collegiate_core::{
    Candidate, InstitutionStore, MatchRequest, PreferenceRequest, Preferences, RankedResult,
};
use geo::Coord;

use crate::{MatchError, SimilarityStrategy, normalize, rank_by_distance, rank_by_score};

/// Runs match requests against an [`InstitutionStore`].
///
/// The engine holds configuration only. Every call is a pure function of
/// the store snapshot and the request, so one engine can serve concurrent
/// queries.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MatchEngine {
    strategy: SimilarityStrategy,
}

impl MatchEngine {
    /// Create an engine that scores with `strategy`.
    #[must_use]
    pub const fn new(strategy: SimilarityStrategy) -> Self {
        Self { strategy }
    }

    /// Similarity strategy used for preference requests.
    #[must_use]
    pub const fn strategy(&self) -> SimilarityStrategy {
        self.strategy
    }

    /// Find and rank the institutions nearest `point`.
    ///
    /// Empty `preferences` take the distance-only path.
    ///
    /// # Errors
    /// See [`MatchEngine::run`].
    pub fn find_matches<'a, S>(
        &self,
        store: &'a S,
        point: Coord<f64>,
        k: i64,
        preferences: Preferences,
    ) -> Result<RankedResult<'a>, MatchError>
    where
        S: InstitutionStore + ?Sized,
    {
        self.run(store, &MatchRequest::new(point, k, preferences))
    }

    /// Execute `request` against `store`.
    ///
    /// # Errors
    /// Returns [`MatchError::InvalidArgument`] for a non-positive `k` or a
    /// non-finite point and [`MatchError::Similarity`] when the configured
    /// strategy cannot score a candidate. Preferences that normalise to an
    /// empty vector score `1.0` everywhere under the Gaussian kernel and
    /// fail with [`SimilarityError::ZeroNormVector`](crate::SimilarityError::ZeroNormVector)
    /// under cosine similarity.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use collegiate_core::{GeoOnlyRequest, MatchRequest};
    /// use collegiate_core::test_support::{MemoryStore, institution_at};
    /// use collegiate_scorer::MatchEngine;
    ///
    /// let store = MemoryStore::with_institutions([
    ///     institution_at("Near", 0.0, 1.0),
    ///     institution_at("Far", 0.0, 2.0),
    /// ]);
    /// let request = MatchRequest::GeoOnly(GeoOnlyRequest {
    ///     point: Coord { x: 0.0, y: 0.0 },
    ///     k: 5,
    /// });
    /// let ranked = MatchEngine::default().run(&store, &request)?;
    /// assert_eq!(ranked.names(), vec!["Far", "Near"]);
    /// # Ok::<(), collegiate_scorer::MatchError>(())
    /// ```
    pub fn run<'a, S>(
        &self,
        store: &'a S,
        request: &MatchRequest,
    ) -> Result<RankedResult<'a>, MatchError>
    where
        S: InstitutionStore + ?Sized,
    {
        let candidates = store.nearest(request.point(), request.k())?;
        log::debug!(
            "retrieved {} of {} institutions near ({}, {})",
            candidates.len(),
            store.len(),
            request.point().y,
            request.point().x,
        );
        match request {
            MatchRequest::GeoOnly(_) => Ok(rank_by_distance(candidates)),
            MatchRequest::Preferences(preference_request) => {
                self.score_candidates(store, preference_request, candidates)
            }
        }
    }

    fn score_candidates<'a, S>(
        &self,
        store: &'a S,
        request: &PreferenceRequest,
        candidates: Vec<Candidate<'a>>,
    ) -> Result<RankedResult<'a>, MatchError>
    where
        S: InstitutionStore + ?Sized,
    {
        let normalized = normalize(&request.preferences, &candidates, store.statistics());
        if normalized.preference.is_empty() {
            log::debug!("no preference survived normalisation; scoring empty vectors");
        }
        let wanted = normalized.preference.values();
        let scores = normalized
            .candidates
            .iter()
            .map(|row| self.strategy.score(&wanted, &row.values()))
            .collect::<Result<Vec<f64>, _>>()?;
        log::debug!(
            "scored {} candidates on {} dimensions",
            scores.len(),
            wanted.len()
        );
        Ok(rank_by_score(candidates.into_iter().zip(scores)))
    }
}
