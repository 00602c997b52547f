//! Behavioural coverage for ranking institutions against preferences.
#![expect(
    clippy::expect_used,
    reason = "behaviour steps fail fast when the pipeline rejects a fixture"
)]

use std::cell::RefCell;

use collegiate_core::test_support::{MemoryStore, field_shares, institution_at};
use collegiate_core::{
    Candidate, ColumnStatistic, ColumnStatistics, FieldOfStudy, InstitutionStore, Preferences,
};
use collegiate_scorer::{MatchEngine, MatchError, normalize};
use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

const COST: &str = "Average Cost of Attendance";

/// Shared state threaded through each scenario.
#[derive(Default)]
pub struct TestContext {
    store: RefCell<Option<MemoryStore>>,
    ranking: RefCell<Option<Result<Vec<(String, f64)>, MatchError>>>,
}

/// Fresh scenario state.
#[fixture]
pub fn context() -> TestContext {
    TestContext::default()
}

impl TestContext {
    fn with_store<T>(&self, f: impl FnOnce(&MemoryStore) -> T) -> T {
        let binding = self.store.borrow();
        f(binding.as_ref().expect("store initialised"))
    }

    fn rank(&self, preferences: Preferences) {
        let outcome = self.with_store(|store| {
            MatchEngine::default()
                .find_matches(store, Coord { x: 0.0, y: 0.0 }, 10, preferences)
                .map(|ranked| {
                    ranked
                        .entries()
                        .iter()
                        .map(|entry| (entry.institution.name.clone(), entry.score))
                        .collect()
                })
        });
        *self.ranking.borrow_mut() = Some(outcome);
    }

    fn ranking(&self) -> Vec<(String, f64)> {
        self.ranking
            .borrow()
            .as_ref()
            .expect("ranking recorded")
            .clone()
            .expect("ranking succeeded")
    }
}

#[given("a single institution costing 50000 with cost statistics 50000 and 10000")]
fn single_institution(context: &TestContext) {
    let store = MemoryStore::with_institutions([
        institution_at("school0", 0.0, 0.0).with_feature(COST, 50_000.0)
    ])
    .with_statistics(ColumnStatistics::from_entries([(
        COST.to_owned(),
        ColumnStatistic {
            mean: 50_000.0,
            std_dev: 10_000.0,
        },
    )]));
    *context.store.borrow_mut() = Some(store);
}

#[given("four institutions at increasing distance from the origin")]
fn four_institutions(context: &TestContext) {
    let store = MemoryStore::with_institutions(
        (1..=4_u32).map(|i| institution_at(&format!("school{i}"), f64::from(i), 0.0)),
    );
    *context.store.borrow_mut() = Some(store);
}

#[given("three institutions with STEM shares 0.8, 0.5 and 0.2")]
fn stem_institutions(context: &TestContext) {
    let store = MemoryStore::with_institutions([
        institution_at("Arts Academy", 0.0, 0.1).with_field_of_study(field_shares(0.2, 0.8)),
        institution_at("Balanced College", 0.0, 0.2).with_field_of_study(field_shares(0.5, 0.5)),
        institution_at("Tech Institute", 0.0, 0.3).with_field_of_study(field_shares(0.8, 0.2)),
    ]);
    *context.store.borrow_mut() = Some(store);
}

#[when("I rank with a cost preference of 50000")]
fn rank_by_cost(context: &TestContext) {
    context.rank(Preferences::new().with_feature(COST, 50_000.0));
}

#[when("I rank without preferences")]
fn rank_without_preferences(context: &TestContext) {
    context.rank(Preferences::new());
}

#[when("I rank with a STEM preference")]
fn rank_by_stem(context: &TestContext) {
    context.rank(Preferences::new().with_field_of_study(FieldOfStudy::Stem));
}

#[then("the institution scores exactly 1.0")]
fn scores_one(context: &TestContext) {
    let ranking = context.ranking();
    assert_eq!(ranking, vec![("school0".to_owned(), 1.0)]);
}

#[then("the scores are one quarter, one half, three quarters and one, farthest first")]
fn positional_scores(context: &TestContext) {
    let ranking = context.ranking();
    let names: Vec<&str> = ranking.iter().map(|(name, _)| name.as_str()).collect();
    let scores: Vec<f64> = ranking.iter().map(|(_, score)| *score).collect();
    assert_eq!(names, ["school4", "school3", "school2", "school1"]);
    assert_eq!(scores, [0.25, 0.5, 0.75, 1.0]);
}

#[then("the STEM-dominant institution is ranked first")]
fn stem_first(context: &TestContext) {
    let ranking = context.ranking();
    let names: Vec<&str> = ranking.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, ["Tech Institute", "Balanced College", "Arts Academy"]);
}

#[then("the institutions score 1.0, 0.5 and 0.0 on the STEM dimension")]
fn stem_dimension(context: &TestContext) {
    context.with_store(|store| {
        let candidates: Vec<Candidate<'_>> = store
            .institutions()
            .iter()
            .map(|institution| Candidate {
                institution,
                distance: 0.0,
            })
            .collect();
        let preferences = Preferences::new().with_field_of_study(FieldOfStudy::Stem);
        let normalized = normalize(&preferences, &candidates, store.statistics());
        let stem: Vec<Vec<f64>> = normalized
            .candidates
            .iter()
            .map(collegiate_scorer::NormalizedVector::values)
            .collect();
        assert_eq!(stem, [vec![0.0], vec![0.5], vec![1.0]]);
    });
}

#[scenario(path = "tests/features/ranking.feature", index = 0)]
fn exact_numeric_match(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/ranking.feature", index = 1)]
fn no_preference_ranking(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/ranking.feature", index = 2)]
fn stem_preference_ranking(context: TestContext) {
    let _ = context;
}
