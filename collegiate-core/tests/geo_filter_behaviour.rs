//! Behavioural tests for the nearest-institution filter.

use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use collegiate_core::{Institution, InvalidArgument, nearest};

type Outcome = Result<Vec<String>, InvalidArgument>;

fn school(index: u32) -> Institution {
    let offset = f64::from(index);
    Institution::new(
        format!("school{index}"),
        "Gridtown",
        "GT",
        Coord {
            x: offset,
            y: offset,
        },
    )
}

fn query(institutions: &[Institution], k: i64) -> Outcome {
    nearest(institutions, Coord { x: 0.0, y: 0.0 }, k).map(|found| {
        found
            .iter()
            .map(|candidate| candidate.institution.name.clone())
            .collect()
    })
}

#[fixture]
fn institutions() -> RefCell<Vec<Institution>> {
    RefCell::new(Vec::new())
}

#[fixture]
fn outcome() -> RefCell<Option<Outcome>> {
    RefCell::new(None)
}

#[given("four institutions on a diagonal")]
fn given_diagonal(#[from(institutions)] institutions: &RefCell<Vec<Institution>>) {
    *institutions.borrow_mut() = (0..4).map(school).collect();
}

#[when("I ask for the 2 institutions nearest the origin")]
fn when_two_nearest(
    #[from(institutions)] institutions: &RefCell<Vec<Institution>>,
    #[from(outcome)] outcome: &RefCell<Option<Outcome>>,
) {
    *outcome.borrow_mut() = Some(query(&institutions.borrow(), 2));
}

#[when("I ask for the 10 institutions nearest the origin")]
fn when_ten_nearest(
    #[from(institutions)] institutions: &RefCell<Vec<Institution>>,
    #[from(outcome)] outcome: &RefCell<Option<Outcome>>,
) {
    *outcome.borrow_mut() = Some(query(&institutions.borrow(), 10));
}

#[when("I ask for the 0 institutions nearest the origin")]
fn when_zero_nearest(
    #[from(institutions)] institutions: &RefCell<Vec<Institution>>,
    #[from(outcome)] outcome: &RefCell<Option<Outcome>>,
) {
    *outcome.borrow_mut() = Some(query(&institutions.borrow(), 0));
}

#[then("the institutions school0 and school1 are returned in that order")]
fn then_two_returned(#[from(outcome)] outcome: &RefCell<Option<Outcome>>) {
    let binding = outcome.borrow();
    match binding.as_ref().expect("query recorded") {
        Ok(names) => assert_eq!(names, &["school0", "school1"]),
        Err(err) => panic!("expected a match, got {err}"),
    }
}

#[then("all four institutions are returned nearest first")]
fn then_all_returned(#[from(outcome)] outcome: &RefCell<Option<Outcome>>) {
    let binding = outcome.borrow();
    match binding.as_ref().expect("query recorded") {
        Ok(names) => assert_eq!(names, &["school0", "school1", "school2", "school3"]),
        Err(err) => panic!("expected a match, got {err}"),
    }
}

#[then("the request is rejected as an invalid argument")]
fn then_rejected(#[from(outcome)] outcome: &RefCell<Option<Outcome>>) {
    let binding = outcome.borrow();
    match binding.as_ref().expect("query recorded") {
        Ok(names) => panic!("expected rejection, got {names:?}"),
        Err(err) => assert_eq!(err, &InvalidArgument::NonPositiveK { k: 0 }),
    }
}

#[scenario(path = "tests/features/geo_filter.feature", index = 0)]
fn scenario_two_nearest(
    institutions: RefCell<Vec<Institution>>,
    outcome: RefCell<Option<Outcome>>,
) {
    let _ = (institutions, outcome);
}

#[scenario(path = "tests/features/geo_filter.feature", index = 1)]
fn scenario_clamped_k(
    institutions: RefCell<Vec<Institution>>,
    outcome: RefCell<Option<Outcome>>,
) {
    let _ = (institutions, outcome);
}

#[scenario(path = "tests/features/geo_filter.feature", index = 2)]
fn scenario_rejects_zero_k(
    institutions: RefCell<Vec<Institution>>,
    outcome: RefCell<Option<Outcome>>,
) {
    let _ = (institutions, outcome);
}
