//! Facade crate for the Collegiate matching engine.
//!
//! This crate re-exports the core domain types and the match engine, and
//! exposes the CSV store and collaborator adapters behind the `data`
//! feature.

#![forbid(unsafe_code)]

pub use collegiate_core::{
    Category, CategoryShares, ColumnStatistic, ColumnStatistics, CompletionError, Demographic,
    ExplanationContext, FALLBACK_IMAGE_URL, FallbackImageLookup, FieldOfStudy, GeoOnlyRequest,
    GeocodeError, Geocoder, ImageLookup, Institution, InstitutionStore, InvalidArgument,
    MatchRequest, PreferenceRequest, Preferences, RankedEntry, RankedResult,
    TextCompletionService, enrich_with_images, explain,
};

pub use collegiate_scorer::{MatchEngine, MatchError, SimilarityError, SimilarityStrategy};

#[cfg(feature = "data")]
pub use collegiate_data::{
    DatasetError, DatasetSchema, HttpGeocoder, HttpGeocoderConfig, HttpImageLookup,
    HttpImageLookupConfig, InstitutionTable, ProcessCompletionConfig, ProcessCompletionService,
};
