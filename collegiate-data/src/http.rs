//! Blocking JSON client shared by the HTTP adapters.
//!
//! The collaborator traits are synchronous so the core stays embeddable in
//! synchronous callers. Each adapter owns a current-thread Tokio runtime and
//! blocks on it. Inside an existing multi-threaded runtime the caller's
//! handle is used through [`tokio::task::block_in_place`] instead, which
//! avoids nested-runtime panics.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

/// Default user agent for outbound requests.
pub const DEFAULT_USER_AGENT: &str = "collegiate/0.1";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while constructing an HTTP adapter.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Transport-level failure of a JSON request.
///
/// `url` never includes the query string, so credentials passed as query
/// parameters do not leak into errors or logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RequestError {
    Network { url: String, message: String },
    Timeout { url: String, timeout_secs: u64 },
    Http { url: String, status: u16, message: String },
    Parse { message: String },
}

pub(crate) struct BlockingClient {
    client: Client,
    runtime: Runtime,
    timeout: Duration,
}

impl std::fmt::Debug for BlockingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingClient")
            .field("client", &self.client)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl BlockingClient {
    pub(crate) fn new(timeout: Duration, user_agent: &str) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(ClientBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ClientBuildError::Runtime)?;
        Ok(Self {
            client,
            runtime,
            timeout,
        })
    }

    /// GET `url` with `query` parameters and decode the JSON body.
    pub(crate) fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, RequestError> {
        let future = self.fetch(url, query);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            // No runtime, or a current_thread runtime: use our own.
            _ => self.runtime.block_on(future),
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, RequestError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|err| self.convert_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_error(&err, url))?;
        response.json().await.map_err(|err| RequestError::Parse {
            message: err.without_url().to_string(),
        })
    }

    fn convert_error(&self, error: &reqwest::Error, url: &str) -> RequestError {
        if error.is_timeout() {
            return RequestError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return RequestError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: status.to_string(),
            };
        }
        RequestError::Network {
            url: url.to_owned(),
            message: describe_without_url(error),
        }
    }
}

fn describe_without_url(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    if let Some(url) = error.url() {
        message = message.replace(url.as_str(), "<url>");
    }
    message
}
