//! Resolve opaque place identifiers to coordinates.
//!
//! Geocoding happens before the match engine runs; the engine itself only
//! ever sees resolved coordinates and performs no network I/O.

use geo::Coord;
use thiserror::Error;

/// Errors from [`Geocoder::geocode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The place identifier was empty.
    #[error("place identifier must not be empty")]
    EmptyPlaceId,
    /// The provider answered with a non-OK status.
    #[error("geocoding API error: {status} - {message}")]
    Status {
        /// Status string reported by the provider.
        status: String,
        /// Optional explanation reported by the provider.
        message: String,
    },
    /// The provider reported success without any result.
    #[error("geocoding API returned no results for '{place_id}'")]
    NoResults {
        /// Identifier that was looked up.
        place_id: String,
    },
    /// The request could not reach the provider.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Endpoint that was contacted.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The request exceeded its timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Endpoint that was contacted.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The provider answered with an HTTP error status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        /// Endpoint that was contacted.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse geocoding response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
}

/// Convert a place identifier into a coordinate.
///
/// Implementations are synchronous and may block on network I/O.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use collegiate_core::{GeocodeError, Geocoder};
///
/// struct FixedGeocoder;
///
/// impl Geocoder for FixedGeocoder {
///     fn geocode(&self, place_id: &str) -> Result<Coord<f64>, GeocodeError> {
///         if place_id.is_empty() {
///             return Err(GeocodeError::EmptyPlaceId);
///         }
///         Ok(Coord { x: -122.08, y: 37.42 })
///     }
/// }
///
/// let location = FixedGeocoder.geocode("ChIJ-example")?;
/// assert_eq!(location.y, 37.42);
/// # Ok::<(), GeocodeError>(())
/// ```
pub trait Geocoder: Send + Sync {
    /// Resolve `place_id` to a coordinate (`x = longitude`, `y = latitude`).
    ///
    /// # Errors
    /// Returns [`GeocodeError`] when the identifier is empty, the provider
    /// rejects it, or the provider cannot be reached.
    fn geocode(&self, place_id: &str) -> Result<Coord<f64>, GeocodeError>;
}
