//! Deterministic collaborator doubles.
//!
//! These stubs answer with pre-configured values so callers can exercise
//! the ranking flow without network access or a local model runner.

use std::collections::HashMap;
use std::sync::Mutex;

use collegiate_core::{
    CompletionError, FALLBACK_IMAGE_URL, GeocodeError, Geocoder, ImageLookup,
    TextCompletionService,
};
use geo::Coord;

/// Stub `Geocoder` returning a fixed outcome for every place identifier.
///
/// # Example
///
/// ```
/// use geo::Coord;
/// use collegiate_core::Geocoder;
/// use collegiate_data::test_support::StubGeocoder;
///
/// let geocoder = StubGeocoder::with_location(Coord { x: -71.1, y: 42.4 });
/// assert_eq!(geocoder.geocode("ChIJ-any").map(|c| c.y), Ok(42.4));
/// ```
#[derive(Debug, Clone)]
pub struct StubGeocoder {
    response: Result<Coord<f64>, GeocodeError>,
}

impl StubGeocoder {
    /// Create a geocoder that resolves every identifier to `location`.
    #[must_use]
    pub const fn with_location(location: Coord<f64>) -> Self {
        Self {
            response: Ok(location),
        }
    }

    /// Create a geocoder that fails every lookup with `error`.
    #[must_use]
    pub const fn with_error(error: GeocodeError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

impl Geocoder for StubGeocoder {
    fn geocode(&self, place_id: &str) -> Result<Coord<f64>, GeocodeError> {
        if place_id.trim().is_empty() {
            return Err(GeocodeError::EmptyPlaceId);
        }
        self.response.clone()
    }
}

/// Stub `ImageLookup` answering from a fixed map, with the fallback URL
/// for unknown queries.
#[derive(Debug, Clone, Default)]
pub struct StubImageLookup {
    images: HashMap<String, String>,
}

impl StubImageLookup {
    /// Register the image returned for `query`.
    #[must_use]
    pub fn with_image(mut self, query: impl Into<String>, url: impl Into<String>) -> Self {
        self.images.insert(query.into(), url.into());
        self
    }
}

impl ImageLookup for StubImageLookup {
    fn first_image(&self, query: &str) -> String {
        self.images
            .get(query)
            .cloned()
            .unwrap_or_else(|| FALLBACK_IMAGE_URL.to_owned())
    }
}

/// Stub `TextCompletionService` that records prompts and returns a fixed
/// reply.
#[derive(Debug)]
pub struct StubCompletionService {
    reply: Result<String, CompletionError>,
    prompts: Mutex<Vec<String>>,
}

impl StubCompletionService {
    /// Create a service answering every prompt with `reply`.
    #[must_use]
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a service failing every prompt with `error`.
    #[must_use]
    pub const fn with_error(error: CompletionError) -> Self {
        Self {
            reply: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

impl TextCompletionService for StubCompletionService {
    fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_owned());
        }
        self.reply.clone()
    }
}
