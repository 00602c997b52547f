//! Error types emitted by the Collegiate CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use collegiate_core::{CompletionError, GeocodeError, InvalidArgument};
use collegiate_data::{ClientBuildError, DatasetError};
use collegiate_scorer::MatchError;
use thiserror::Error;

/// Errors emitted by the Collegiate CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// An option holds a value the command cannot use.
    #[error("invalid value for --{field}: {reason}")]
    InvalidArgument {
        field: &'static str,
        reason: String,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening a request file failed.
    #[error("failed to open request at {path:?}: {source}")]
    OpenRequest {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Request JSON could not be decoded.
    #[error("failed to parse request JSON at {path:?}: {source}")]
    ParseRequest {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The request names neither a place identifier nor coordinates.
    #[error("request in {path:?} needs a place_id or both lat and lng")]
    MissingLocation { path: Utf8PathBuf },
    /// The request payload failed validation.
    #[error("request in {path:?} failed validation: {source}")]
    InvalidRequest {
        path: Utf8PathBuf,
        #[source]
        source: InvalidArgument,
    },
    /// Loading the institution table failed.
    #[error("failed to load dataset: {0}")]
    LoadDataset(#[from] DatasetError),
    /// Constructing an HTTP collaborator failed.
    #[error("failed to build {service} client: {source}")]
    BuildClient {
        service: &'static str,
        #[source]
        source: ClientBuildError,
    },
    /// Resolving the request location failed.
    #[error("failed to geocode request location: {0}")]
    Geocode(#[from] GeocodeError),
    /// The match engine rejected the request.
    #[error("matching failed: {0}")]
    Match(#[from] MatchError),
    /// The completion backend failed.
    #[error("explanation failed: {0}")]
    Completion(#[from] CompletionError),
    /// Serializing the command output failed.
    #[error("failed to serialize response: {0}")]
    SerializeResponse(#[source] serde_json::Error),
    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
