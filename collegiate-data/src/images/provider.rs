//! Blocking [`ImageLookup`] backed by a custom-search endpoint.

use std::time::Duration;

use collegiate_core::{FALLBACK_IMAGE_URL, ImageLookup};

use super::search::SearchResponse;
use crate::http::{BlockingClient, ClientBuildError, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};

/// Google custom-search endpoint.
pub const DEFAULT_IMAGE_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Configuration for [`HttpImageLookup`].
#[derive(Clone)]
pub struct HttpImageLookupConfig {
    /// Search endpoint, for example
    /// `"https://www.googleapis.com/customsearch/v1"`.
    pub base_url: String,
    /// API key sent as the `key` query parameter.
    pub api_key: String,
    /// Search engine identifier sent as the `cx` query parameter.
    pub search_engine_id: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl std::fmt::Debug for HttpImageLookupConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpImageLookupConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("search_engine_id", &self.search_engine_id)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl HttpImageLookupConfig {
    /// Create a configuration for `base_url`.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        search_engine_id: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            search_engine_id: search_engine_id.into(),
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

/// Image lookup that asks a search provider for one image per query.
///
/// Any failure (transport, HTTP status, decoding or an empty result set) is
/// logged at `warn` and answered with [`FALLBACK_IMAGE_URL`].
#[derive(Debug)]
pub struct HttpImageLookup {
    client: BlockingClient,
    config: HttpImageLookupConfig,
}

impl HttpImageLookup {
    /// Create a lookup with explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpImageLookupConfig) -> Result<Self, ClientBuildError> {
        let client = BlockingClient::new(config.timeout, &config.user_agent)?;
        Ok(Self { client, config })
    }
}

impl ImageLookup for HttpImageLookup {
    fn first_image(&self, query: &str) -> String {
        let params = [
            ("q", query),
            ("cx", self.config.search_engine_id.as_str()),
            ("key", self.config.api_key.as_str()),
            ("searchType", "image"),
            ("num", "1"),
        ];
        match self
            .client
            .get_json::<SearchResponse>(&self.config.base_url, &params)
        {
            Ok(response) => response.first_link().map_or_else(
                || {
                    log::warn!("no image found for '{query}'; using fallback");
                    FALLBACK_IMAGE_URL.to_owned()
                },
                str::to_owned,
            ),
            Err(err) => {
                log::warn!("image search for '{query}' failed: {err:?}; using fallback");
                FALLBACK_IMAGE_URL.to_owned()
            }
        }
    }
}
