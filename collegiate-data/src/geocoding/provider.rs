//! Blocking [`Geocoder`] backed by a Google-style geocoding endpoint.

use std::time::Duration;

use collegiate_core::{GeocodeError, Geocoder};
use geo::Coord;

use super::google::GeocodeResponse;
use crate::http::{BlockingClient, ClientBuildError, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, RequestError};

/// Google geocoding endpoint.
pub const DEFAULT_GEOCODING_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Configuration for [`HttpGeocoder`].
#[derive(Clone)]
pub struct HttpGeocoderConfig {
    /// Geocoding endpoint, for example
    /// `"https://maps.googleapis.com/maps/api/geocode/json"`.
    pub base_url: String,
    /// API key sent as the `key` query parameter.
    pub api_key: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl std::fmt::Debug for HttpGeocoderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGeocoderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl HttpGeocoderConfig {
    /// Create a configuration for `base_url` authenticated with `api_key`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Geocoder that resolves place identifiers over HTTP.
///
/// Calls block the current thread. See the [`crate::http`] module for how
/// the adapter behaves inside an existing Tokio runtime.
#[derive(Debug)]
pub struct HttpGeocoder {
    client: BlockingClient,
    config: HttpGeocoderConfig,
}

impl HttpGeocoder {
    /// Create a geocoder with default timeout and user agent.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ClientBuildError> {
        Self::with_config(HttpGeocoderConfig::new(base_url, api_key))
    }

    /// Create a geocoder with explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpGeocoderConfig) -> Result<Self, ClientBuildError> {
        let client = BlockingClient::new(config.timeout, &config.user_agent)?;
        Ok(Self { client, config })
    }

    fn convert_response(place_id: &str, response: GeocodeResponse) -> Result<Coord<f64>, GeocodeError> {
        if !response.is_ok() {
            return Err(GeocodeError::Status {
                status: response.status,
                message: response.error_message.unwrap_or_default(),
            });
        }
        let location = response
            .results
            .into_iter()
            .next()
            .map(|result| result.geometry.location)
            .ok_or_else(|| GeocodeError::NoResults {
                place_id: place_id.to_owned(),
            })?;
        if !location.lat.is_finite() || !location.lng.is_finite() {
            return Err(GeocodeError::Parse {
                message: format!("non-finite location ({}, {})", location.lat, location.lng),
            });
        }
        Ok(Coord {
            x: location.lng,
            y: location.lat,
        })
    }
}

impl Geocoder for HttpGeocoder {
    fn geocode(&self, place_id: &str) -> Result<Coord<f64>, GeocodeError> {
        let trimmed = place_id.trim();
        if trimmed.is_empty() {
            return Err(GeocodeError::EmptyPlaceId);
        }
        let response: GeocodeResponse = self
            .client
            .get_json(
                &self.config.base_url,
                &[("place_id", trimmed), ("key", self.config.api_key.as_str())],
            )
            .map_err(into_geocode_error)?;
        let location = Self::convert_response(trimmed, response)?;
        log::debug!("geocoded {trimmed} to ({}, {})", location.y, location.x);
        Ok(location)
    }
}

fn into_geocode_error(error: RequestError) -> GeocodeError {
    match error {
        RequestError::Network { url, message } => GeocodeError::Network { url, message },
        RequestError::Timeout { url, timeout_secs } => GeocodeError::Timeout { url, timeout_secs },
        RequestError::Http {
            url,
            status,
            message,
        } => GeocodeError::Http {
            url,
            status,
            message,
        },
        RequestError::Parse { message } => GeocodeError::Parse { message },
    }
}
