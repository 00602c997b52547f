//! Behaviour-driven step definitions driving the rank CLI scenarios.

use super::helpers::{StubRankServices, Workspace, write_utf8};
use super::*;
use crate::payload::RankResponse;
use crate::rank::run_rank_with;
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::json;
use std::cell::RefCell;

struct RankWorld {
    workspace: Workspace,
    request_path: Utf8PathBuf,
    include_request: RefCell<bool>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl RankWorld {
    fn new() -> Self {
        let workspace = Workspace::new();
        let request_path = workspace.path("request.json");
        Self {
            workspace,
            request_path,
            include_request: RefCell::new(true),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["collegiate".to_owned(), "rank".to_owned()];
        if *self.include_request.borrow() {
            argv.push(self.request_path.as_str().to_owned());
        }
        argv.extend([
            format!("--{ARG_RANK_DATASET}"),
            self.workspace.path("institutions.csv").as_str().to_owned(),
        ]);
        argv
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }
}

#[fixture]
fn world() -> RankWorld {
    RankWorld::new()
}

#[given("a dataset file exists on disk")]
fn dataset_exists(#[from(world)] world: &RankWorld) {
    world.workspace.write_dataset();
}

#[given("a rank request for place \"ChIJ-origin\" with k 4")]
fn location_only_request(#[from(world)] world: &RankWorld) {
    world
        .workspace
        .write_json("request.json", &json!({ "place_id": "ChIJ-origin", "k": 4 }));
}

#[given("a rank request for place \"ChIJ-origin\" with k 4 preferring STEM")]
fn stem_request(#[from(world)] world: &RankWorld) {
    world.workspace.write_json(
        "request.json",
        &json!({ "place_id": "ChIJ-origin", "k": 4, "Major": "STEM" }),
    );
}

#[given("the rank request contains invalid JSON")]
fn invalid_json_request(#[from(world)] world: &RankWorld) {
    write_utf8(&world.request_path, b"{ not valid json");
}

#[given("I omit the rank request path")]
fn omit_request_path(#[from(world)] world: &RankWorld) {
    *world.include_request.borrow_mut() = false;
}

#[when("I run the rank command")]
fn run_rank_command(#[from(world)] world: &RankWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Rank(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_rank_with(args, &StubRankServices::new(), &mut *buffer)
        }
        Command::Explain(_) => panic!("expected rank command"),
    });
    world.result.replace(Some(outcome));
}

fn decoded_response(world: &RankWorld) -> RankResponse {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    if let Err(err) = result {
        panic!("expected success, found {err:?}");
    }
    let stdout = String::from_utf8(world.stdout.borrow().clone()).expect("stdout utf-8");
    serde_json::from_str(&stdout).expect("output should be a JSON rank response")
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',').map(|item| item.trim().to_owned()).collect()
}

#[then("the command succeeds and lists \"school3, school2, school1, school0\"")]
fn lists_farthest_first(#[from(world)] world: &RankWorld) {
    let response = decoded_response(world);
    assert_eq!(response.schools, split_list("school3, school2, school1, school0"));
}

#[then("the similarities are \"0.25, 0.5, 0.75, 1\"")]
fn positional_similarities(#[from(world)] world: &RankWorld) {
    let response = decoded_response(world);
    assert_eq!(response.similarities, vec![0.25, 0.5, 0.75, 1.0]);
}

#[then("the command succeeds and lists \"school0, school3, school1, school2\"")]
fn lists_stem_heavy_first(#[from(world)] world: &RankWorld) {
    let response = decoded_response(world);
    assert_eq!(response.schools, split_list("school0, school3, school1, school2"));
}

#[then("the command fails because the request JSON is invalid")]
fn command_fails_invalid_json(#[from(world)] world: &RankWorld) {
    match &*world.error() {
        CliError::ParseRequest { path, .. } => assert_eq!(*path, world.request_path),
        other => panic!("expected ParseRequest, found {other:?}"),
    }
}

#[then("the command fails because the request path is missing")]
fn command_fails_missing_request_path(#[from(world)] world: &RankWorld) {
    match &*world.error() {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_RANK_REQUEST),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

macro_rules! register_rank_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/rank_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: RankWorld) {
            let _ = world;
        }
    };
}

register_rank_scenario!(rank_location_only, "ranking a location-only request");
register_rank_scenario!(rank_with_preferences, "ranking a request with preferences");
register_rank_scenario!(rank_invalid_json, "rejecting invalid JSON input");
register_rank_scenario!(rank_missing_request, "rejecting missing request paths");
