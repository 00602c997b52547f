//! Response types for the Google Geocoding API.
//!
//! See: <https://developers.google.com/maps/documentation/geocoding/requests-place-id>

use serde::Deserialize;

/// Geocoding API response.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    /// Status code; `"OK"` on success, for example `"INVALID_REQUEST"` or
    /// `"ZERO_RESULTS"` otherwise.
    pub status: String,
    /// Explanation accompanying a non-OK status.
    pub error_message: Option<String>,
    /// Matches for the request, best first.
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

impl GeocodeResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

/// One geocoding match.
#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    /// Geometry of the match.
    pub geometry: Geometry,
}

/// Geometry block of a match.
#[derive(Debug, Deserialize)]
pub struct Geometry {
    /// Representative point of the match.
    pub location: LatLng,
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}
