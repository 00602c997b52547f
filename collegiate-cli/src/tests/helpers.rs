//! Test helpers for composing CLI workspaces and stub collaborators.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use collegiate_core::test_support::{MemoryStore, field_shares, institution_at};
use collegiate_core::{
    CompletionError, Geocoder, ImageLookup, InstitutionStore, TextCompletionService,
};
use collegiate_data::test_support::{StubCompletionService, StubGeocoder, StubImageLookup};
use geo::Coord;
use tempfile::TempDir;

use crate::CliError;
use crate::explain::{ExplainConfig, ExplainServiceBuilder};
use crate::rank::{RankConfig, RankServicesBuilder};

pub(super) const COST: &str = "Average Cost of Attendance";

pub(super) const DATASET_CSV: &str = "\
Institution Name_x,City,State Abbreviation,Latitude,Longitude,Average Cost of Attendance,\
STEM,Arts and Humanities,White,American Indian or Alaska Native,Asian,\
Black or African American,Latino,Native Hawaiian or Other Pacific Islander
Near College,Cambridge,MA,42.37,-71.11,60000,0.8,0.2,0.5,0.0,0.2,0.1,0.2,0.0
Middle University,Worcester,MA,42.26,-71.80,45000,0.5,0.5,0.6,0.0,0.1,0.1,0.2,0.0
Far Institute,Albany,NY,42.65,-73.75,30000,0.2,0.8,0.7,0.0,0.1,0.1,0.1,0.0
";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

/// Temporary directory holding request and dataset files.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write_json(&self, name: &str, value: &serde_json::Value) -> Utf8PathBuf {
        let path = self.path(name);
        let payload = serde_json::to_string_pretty(value).expect("serialize request");
        write_utf8(&path, payload.as_bytes());
        path
    }

    pub(super) fn write_dataset(&self) -> Utf8PathBuf {
        let path = self.path("institutions.csv");
        write_utf8(&path, DATASET_CSV.as_bytes());
        path
    }
}

/// Four institutions north-east of the origin, nearest first.
pub(super) fn memory_store() -> MemoryStore {
    MemoryStore::with_institutions([
        institution_at("school0", 0.1, 0.1)
            .with_feature(COST, 50_000.0)
            .with_field_of_study(field_shares(0.8, 0.2)),
        institution_at("school1", 0.2, 0.2)
            .with_feature(COST, 40_000.0)
            .with_field_of_study(field_shares(0.5, 0.5)),
        institution_at("school2", 0.3, 0.3)
            .with_feature(COST, 60_000.0)
            .with_field_of_study(field_shares(0.2, 0.8)),
        institution_at("school3", 0.4, 0.4)
            .with_feature(COST, 55_000.0)
            .with_field_of_study(field_shares(0.6, 0.4)),
    ])
}

/// Rank collaborators backed by in-memory doubles.
pub(super) struct StubRankServices {
    pub(super) store: MemoryStore,
    pub(super) geocoder: StubGeocoder,
    pub(super) images: StubImageLookup,
}

impl StubRankServices {
    pub(super) fn new() -> Self {
        Self {
            store: memory_store(),
            geocoder: StubGeocoder::with_location(Coord { x: 0.0, y: 0.0 }),
            images: StubImageLookup::default().with_image("school0", "https://img.example/0.jpg"),
        }
    }
}

impl RankServicesBuilder for StubRankServices {
    fn store(&self, _config: &RankConfig) -> Result<Box<dyn InstitutionStore>, CliError> {
        Ok(Box::new(self.store.clone()))
    }

    fn geocoder(&self, _config: &RankConfig) -> Result<Box<dyn Geocoder>, CliError> {
        Ok(Box::new(self.geocoder.clone()))
    }

    fn image_lookup(&self, _config: &RankConfig) -> Result<Box<dyn ImageLookup>, CliError> {
        Ok(Box::new(self.images.clone()))
    }
}

/// Completion service shared between the builder and the test body.
pub(super) struct SharedCompletion(pub(super) Arc<StubCompletionService>);

impl TextCompletionService for SharedCompletion {
    fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.0.complete(prompt)
    }
}

/// Explain collaborator handing out one shared stub service.
pub(super) struct StubExplainService {
    pub(super) service: Arc<StubCompletionService>,
}

impl StubExplainService {
    pub(super) fn replying(reply: &str) -> Self {
        Self {
            service: Arc::new(StubCompletionService::with_reply(reply)),
        }
    }

    pub(super) fn failing(error: CompletionError) -> Self {
        Self {
            service: Arc::new(StubCompletionService::with_error(error)),
        }
    }
}

impl ExplainServiceBuilder for StubExplainService {
    fn build(&self, _config: &ExplainConfig) -> Box<dyn TextCompletionService> {
        Box::new(SharedCompletion(Arc::clone(&self.service)))
    }
}
