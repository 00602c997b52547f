//! Data access and collaborator adapters for the Collegiate engine.
//!
//! Responsibilities:
//! - Load the institution table from CSV into an immutable
//!   [`collegiate_core::InstitutionStore`].
//! - Provide HTTP adapters for geocoding and image search.
//! - Run a local command as the text completion backend.
//!
//! Boundaries:
//! - Do not encode matching rules (those live in `collegiate-core` and
//!   `collegiate-scorer`).
//! - Adapters are blocking; async work stays inside their own runtimes.
//!
//! Invariants:
//! - Loaded tables are never mutated.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod completion;
pub mod dataset;
pub mod fs;
pub mod geocoding;
pub mod http;
pub mod images;

#[doc(hidden)]
pub mod test_support;

pub use completion::{ProcessCompletionConfig, ProcessCompletionService};
pub use dataset::{DatasetError, DatasetSchema, InstitutionTable};
pub use geocoding::{DEFAULT_GEOCODING_URL, HttpGeocoder, HttpGeocoderConfig};
pub use http::{ClientBuildError, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use images::{DEFAULT_IMAGE_SEARCH_URL, HttpImageLookup, HttpImageLookupConfig};
