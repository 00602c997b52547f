//! JSON payloads read and written by the subcommands.
//!
//! Field names follow the web client that drives the engine: the ranking
//! response uses camel case (`schoolImageUrls`) and the category
//! preferences accept the `Major` and `Race` spellings.

use collegiate_core::{ExplanationContext, InvalidArgument, Preferences, RankedResult};
use geo::Coord;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request keys that describe the search location rather than a criterion.
const LOCATION_KEYS: [&str; 4] = ["place_id", "k", "lat", "lng"];

/// A `rank` request.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub(crate) struct RankRequest {
    /// Place identifier resolved through the geocoder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) place_id: Option<String>,
    /// Latitude of the search point; skips geocoding together with `lng`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) lat: Option<f64>,
    /// Longitude of the search point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) lng: Option<f64>,
    /// Number of nearby institutions to rank.
    pub(crate) k: i64,
    /// Desired raw values keyed by numeric feature name, in request order.
    #[serde(default)]
    pub(crate) preferences: IndexMap<String, f64>,
    /// Preferred field of study label.
    #[serde(default, alias = "Major", skip_serializing_if = "Option::is_none")]
    pub(crate) major: Option<String>,
    /// Preferred demographic label.
    #[serde(default, alias = "Race", skip_serializing_if = "Option::is_none")]
    pub(crate) race: Option<String>,
}

impl RankRequest {
    /// Explicit coordinates, when both are present.
    pub(crate) fn coordinates(&self) -> Option<Coord<f64>> {
        self.lat.zip(self.lng).map(|(lat, lng)| Coord { x: lng, y: lat })
    }

    /// Build typed preferences; blank category labels count as unset.
    pub(crate) fn preferences(&self) -> Result<Preferences, InvalidArgument> {
        let mut preferences = self
            .preferences
            .iter()
            .fold(Preferences::new(), |acc, (name, value)| {
                acc.with_feature(name.as_str(), *value)
            });
        if let Some(label) = non_blank(self.major.as_deref()) {
            preferences = preferences.with_field_of_study_label(label)?;
        }
        if let Some(label) = non_blank(self.race.as_deref()) {
            preferences = preferences.with_demographic_label(label)?;
        }
        Ok(preferences)
    }
}

fn non_blank(label: Option<&str>) -> Option<&str> {
    label.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

/// Latitude and longitude of the resolved search point.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub(crate) struct Location {
    pub(crate) lat: f64,
    pub(crate) lng: f64,
}

impl From<Coord<f64>> for Location {
    fn from(point: Coord<f64>) -> Self {
        Self {
            lat: point.y,
            lng: point.x,
        }
    }
}

/// A `rank` response: parallel lists in ranked order.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RankResponse {
    pub(crate) location: Location,
    pub(crate) schools: Vec<String>,
    pub(crate) similarities: Vec<f64>,
    pub(crate) school_image_urls: Vec<String>,
}

impl RankResponse {
    pub(crate) fn new(point: Coord<f64>, ranked: &RankedResult<'_>, images: Vec<String>) -> Self {
        Self {
            location: point.into(),
            schools: ranked.names().into_iter().map(str::to_owned).collect(),
            similarities: ranked.scores(),
            school_image_urls: images,
        }
    }
}

/// An `explain` request.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExplainRequest {
    pub(crate) school_name: String,
    pub(crate) similarity: f64,
    /// The `rank` request that produced the score.
    #[serde(default)]
    pub(crate) search_params: serde_json::Map<String, Value>,
    /// Earlier chat turns, oldest first. Non-string turns are kept as JSON.
    #[serde(default)]
    pub(crate) history: Vec<Value>,
    pub(crate) message: String,
}

impl ExplainRequest {
    /// Criteria and history rendered for the explanation prompt.
    pub(crate) fn into_context(self) -> ExplanationContext {
        let criteria = self
            .search_params
            .into_iter()
            .filter(|(name, _)| !LOCATION_KEYS.contains(&name.as_str()))
            .map(|(name, value)| (name, render(value)))
            .collect();
        ExplanationContext {
            institution_name: self.school_name,
            score: self.similarity,
            criteria,
            history: self.history.into_iter().map(render).collect(),
            message: self.message,
        }
    }
}

fn render(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}
