//! Rank command implementation for the Collegiate CLI.

use std::io::Write;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use collegiate_core::{
    FallbackImageLookup, Geocoder, ImageLookup, InstitutionStore, MatchRequest,
    enrich_with_images,
};
use collegiate_data::{
    DEFAULT_GEOCODING_URL, DEFAULT_IMAGE_SEARCH_URL, DEFAULT_TIMEOUT, DatasetSchema,
    HttpGeocoder, HttpGeocoderConfig, HttpImageLookup, HttpImageLookupConfig, InstitutionTable,
};
use collegiate_scorer::{DEFAULT_BANDWIDTH, MatchEngine, SimilarityStrategy};
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::payload::{RankRequest, RankResponse};
use crate::sources::{load_json, require_existing};
use crate::{
    ARG_RANK_API_KEY, ARG_RANK_BANDWIDTH, ARG_RANK_DATASET, ARG_RANK_GEOCODING_URL,
    ARG_RANK_IMAGE_SEARCH_URL, ARG_RANK_REQUEST, ARG_RANK_SEARCH_ENGINE_ID, ARG_RANK_SIMILARITY,
    ARG_RANK_TIMEOUT_SECS, CliError, ENV_RANK_API_KEY, ENV_RANK_DATASET, ENV_RANK_REQUEST,
};

/// Similarity measure selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SimilarityKind {
    /// Gaussian kernel over the Euclidean distance.
    #[default]
    Gaussian,
    /// Cosine of the angle between the vectors.
    Cosine,
}

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank the institutions nearest a location against the \
                 preferences in a JSON match request. The location is a \
                 place identifier resolved through the geocoding service \
                 or explicit lat/lng coordinates. Images are looked up \
                 when an image search engine is configured.",
    about = "Rank institutions for a match request"
)]
#[ortho_config(prefix = "COLLEGIATE")]
pub(crate) struct RankArgs {
    /// Path to a JSON file containing a match request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to the institution CSV table.
    #[arg(long = ARG_RANK_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Geocoding endpoint used to resolve place identifiers.
    #[arg(long = ARG_RANK_GEOCODING_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) geocoding_url: Option<String>,
    /// Image search endpoint.
    #[arg(long = ARG_RANK_IMAGE_SEARCH_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) image_search_url: Option<String>,
    /// API key shared by the geocoding and image search services.
    #[arg(long = ARG_RANK_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Image search engine identifier; images are skipped when unset.
    #[arg(long = ARG_RANK_SEARCH_ENGINE_ID, value_name = "id")]
    #[serde(default)]
    pub(crate) search_engine_id: Option<String>,
    /// Similarity measure for preference requests.
    #[arg(long = ARG_RANK_SIMILARITY, value_enum)]
    #[serde(default)]
    pub(crate) similarity: Option<SimilarityKind>,
    /// Gaussian kernel bandwidth.
    #[arg(long = ARG_RANK_BANDWIDTH, value_name = "width")]
    #[serde(default)]
    pub(crate) bandwidth: Option<f64>,
    /// Timeout for each collaborator request, in seconds.
    #[arg(long = ARG_RANK_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RankConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Path to the institution table.
    pub(crate) dataset: Utf8PathBuf,
    /// Geocoding endpoint.
    pub(crate) geocoding_url: String,
    /// Image search endpoint.
    pub(crate) image_search_url: String,
    /// Shared API key, required only when a collaborator is contacted.
    pub(crate) api_key: Option<String>,
    /// Image search engine identifier.
    pub(crate) search_engine_id: Option<String>,
    /// Similarity strategy handed to the engine.
    pub(crate) strategy: SimilarityStrategy,
    /// Per-request collaborator timeout.
    pub(crate) timeout: Duration,
}

impl RankConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_RANK_REQUEST)?;
        require_existing(&self.dataset, ARG_RANK_DATASET)?;
        Ok(())
    }

    fn api_key(&self) -> Result<&str, CliError> {
        self.api_key.as_deref().ok_or(CliError::MissingArgument {
            field: ARG_RANK_API_KEY,
            env: ENV_RANK_API_KEY,
        })
    }
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_RANK_REQUEST,
            env: ENV_RANK_REQUEST,
        })?;
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_RANK_DATASET,
            env: ENV_RANK_DATASET,
        })?;

        let bandwidth = args.bandwidth.unwrap_or(DEFAULT_BANDWIDTH);
        if !bandwidth.is_finite() || bandwidth <= 0.0 {
            return Err(CliError::InvalidArgument {
                field: ARG_RANK_BANDWIDTH,
                reason: format!("{bandwidth} is not a positive, finite width"),
            });
        }
        let strategy = match args.similarity.unwrap_or_default() {
            SimilarityKind::Gaussian => SimilarityStrategy::GaussianKernel { bandwidth },
            SimilarityKind::Cosine => SimilarityStrategy::Cosine,
        };

        let timeout = match args.timeout_secs {
            Some(0) => {
                return Err(CliError::InvalidArgument {
                    field: ARG_RANK_TIMEOUT_SECS,
                    reason: "timeout must be at least one second".to_owned(),
                });
            }
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            request_path,
            dataset,
            geocoding_url: args
                .geocoding_url
                .unwrap_or_else(|| DEFAULT_GEOCODING_URL.to_owned()),
            image_search_url: args
                .image_search_url
                .unwrap_or_else(|| DEFAULT_IMAGE_SEARCH_URL.to_owned()),
            api_key: args.api_key,
            search_engine_id: args.search_engine_id,
            strategy,
            timeout,
        })
    }
}

/// Builds the store and collaborators for the current rank invocation.
pub(super) trait RankServicesBuilder {
    fn store(&self, config: &RankConfig) -> Result<Box<dyn InstitutionStore>, CliError>;
    fn geocoder(&self, config: &RankConfig) -> Result<Box<dyn Geocoder>, CliError>;
    fn image_lookup(&self, config: &RankConfig) -> Result<Box<dyn ImageLookup>, CliError>;
}

pub(super) struct DefaultRankServicesBuilder;

impl RankServicesBuilder for DefaultRankServicesBuilder {
    fn store(&self, config: &RankConfig) -> Result<Box<dyn InstitutionStore>, CliError> {
        let table = InstitutionTable::load(&config.dataset, &DatasetSchema::default())?;
        Ok(Box::new(table))
    }

    fn geocoder(&self, config: &RankConfig) -> Result<Box<dyn Geocoder>, CliError> {
        let geocoder_config = HttpGeocoderConfig::new(&config.geocoding_url, config.api_key()?)
            .with_timeout(config.timeout);
        let geocoder = HttpGeocoder::with_config(geocoder_config).map_err(|source| {
            CliError::BuildClient {
                service: "geocoding",
                source,
            }
        })?;
        Ok(Box::new(geocoder))
    }

    fn image_lookup(&self, config: &RankConfig) -> Result<Box<dyn ImageLookup>, CliError> {
        let (Some(search_engine_id), Some(api_key)) =
            (config.search_engine_id.as_deref(), config.api_key.as_deref())
        else {
            log::info!("image search is not configured; using the fallback image");
            return Ok(Box::new(FallbackImageLookup));
        };
        let lookup_config =
            HttpImageLookupConfig::new(&config.image_search_url, api_key, search_engine_id)
                .with_timeout(config.timeout);
        let lookup = HttpImageLookup::with_config(lookup_config).map_err(|source| {
            CliError::BuildClient {
                service: "image search",
                source,
            }
        })?;
        Ok(Box::new(lookup))
    }
}

pub(super) fn run_rank(args: RankArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultRankServicesBuilder;
    run_rank_with(args, &builder, &mut stdout)
}

pub(super) fn run_rank_with(
    args: RankArgs,
    builder: &dyn RankServicesBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_rank_config(args)?;
    let response = execute_rank(&config, builder)?;
    write_rank_response(writer, &response)
}

fn resolve_rank_config(args: RankArgs) -> Result<RankConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

pub(super) fn execute_rank(
    config: &RankConfig,
    builder: &dyn RankServicesBuilder,
) -> Result<RankResponse, CliError> {
    let request: RankRequest = load_json(&config.request_path)?;
    let preferences = request
        .preferences()
        .map_err(|source| CliError::InvalidRequest {
            path: config.request_path.clone(),
            source,
        })?;
    let store = builder.store(config)?;
    let point = resolve_location(&request, config, builder)?;

    let engine = MatchEngine::new(config.strategy);
    let ranked = engine.run(
        store.as_ref(),
        &MatchRequest::new(point, request.k, preferences),
    )?;
    log::info!("ranked {} institutions", ranked.len());

    let lookup = builder.image_lookup(config)?;
    let images = enrich_with_images(&ranked, lookup.as_ref());
    Ok(RankResponse::new(point, &ranked, images))
}

fn resolve_location(
    request: &RankRequest,
    config: &RankConfig,
    builder: &dyn RankServicesBuilder,
) -> Result<Coord<f64>, CliError> {
    if let Some(point) = request.coordinates() {
        return Ok(point);
    }
    let place_id = request
        .place_id
        .as_deref()
        .ok_or_else(|| CliError::MissingLocation {
            path: config.request_path.clone(),
        })?;
    let geocoder = builder.geocoder(config)?;
    Ok(geocoder.geocode(place_id)?)
}

fn write_rank_response(writer: &mut dyn Write, response: &RankResponse) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(response).map_err(CliError::SerializeResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged)
}
