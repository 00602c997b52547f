//! HTTP image search for ranked institutions.
//!
//! [`HttpImageLookup`] implements [`collegiate_core::ImageLookup`] against a
//! custom-search endpoint (`q`, `cx`, `key`, `searchType=image`, `num=1`).
//! Lookups never fail; misses and errors yield
//! [`collegiate_core::FALLBACK_IMAGE_URL`].

mod provider;
mod search;

pub use provider::{DEFAULT_IMAGE_SEARCH_URL, HttpImageLookup, HttpImageLookupConfig};
pub use search::{SearchItem, SearchResponse};
