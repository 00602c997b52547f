//! HTTP geocoding of place identifiers.
//!
//! [`HttpGeocoder`] implements [`collegiate_core::Geocoder`] against a
//! Google-style geocoding endpoint, sending the `place_id` and `key` query
//! parameters.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use collegiate_core::Geocoder;
//! use collegiate_data::geocoding::{HttpGeocoder, HttpGeocoderConfig};
//!
//! let config = HttpGeocoderConfig::new("https://maps.googleapis.com/maps/api/geocode/json", "api-key")
//!     .with_timeout(Duration::from_secs(10));
//! let geocoder = HttpGeocoder::with_config(config)?;
//! let location = geocoder.geocode("ChIJ2eUgeAK6j4ARbn5u_wAGqWA")?;
//! println!("lat {} lng {}", location.y, location.x);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod google;
mod provider;

pub use google::{GeocodeResponse, GeocodeResult, Geometry, LatLng};
pub use provider::{DEFAULT_GEOCODING_URL, HttpGeocoder, HttpGeocoderConfig};
