//! Core domain types for the Collegiate matching engine.
//!
//! The crate defines the institution model, the frozen column statistics
//! used for standardisation, the read-only [`InstitutionStore`] boundary
//! with its planar nearest-neighbour filter, typed match requests and
//! ranked results, and the traits for the external collaborators
//! (geocoding, image lookup and text completion).
//!
//! Coordinates are `geo::Coord<f64>` with `x = longitude` and
//! `y = latitude`, mirroring WGS84 axis order.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod category;
pub mod completion;
pub mod geo_filter;
pub mod geocode;
pub mod image;
pub mod institution;
pub mod request;
pub mod result;
pub mod statistics;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use category::{Category, CategoryShares, Demographic, FieldOfStudy};
pub use completion::{CompletionError, ExplanationContext, TextCompletionService, explain};
pub use geo_filter::{Candidate, InvalidArgument, nearest};
pub use geocode::{GeocodeError, Geocoder};
pub use image::{FALLBACK_IMAGE_URL, FallbackImageLookup, ImageLookup, enrich_with_images};
pub use institution::Institution;
pub use request::{GeoOnlyRequest, MatchRequest, PreferenceRequest, Preferences};
pub use result::{RankedEntry, RankedResult};
pub use statistics::{ColumnStatistic, ColumnStatistics};
pub use store::InstitutionStore;
