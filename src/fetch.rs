//! Blocking HTTP client shared by every pipeline stage.
//!
//! One agent per run carries the proxy and the global per-request timeout.
//! Requests are strictly sequential; non-2xx statuses are failures.

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::error::BlazorgrabError;

/// Upper bound on a single resource body. Framework payloads run to tens of
/// megabytes; anything past this is treated as a failure, not truncated.
const RESOURCE_BODY_LIMIT: u64 = 256 * 1024 * 1024;

/// Why a single HTTP fetch failed. Stages wrap this into their own
/// [`BlazorgrabError`] variant together with the URL they were fetching.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("server sent '{content_type}' where a binary resource was expected")]
    HtmlBody { content_type: String },

    #[error("{0}")]
    Transport(ureq::Error),
}

pub struct Client {
    agent: ureq::Agent,
}

impl Client {
    /// Build the agent for this run. Fails only on an unusable proxy URL.
    pub fn new(timeout: Duration, proxy: Option<&str>) -> Result<Client, BlazorgrabError> {
        let proxy = match proxy {
            Some(raw) => Some(ureq::Proxy::new(raw).map_err(|source| {
                BlazorgrabError::InvalidProxy {
                    url: raw.to_string(),
                    message: source.to_string(),
                }
            })?),
            None => None,
        };

        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .proxy(proxy)
            .build();

        Ok(Client {
            agent: config.into(),
        })
    }

    /// GET a textual body (entry page, manifest).
    pub fn text(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "GET text");
        let mut response = self.call(url)?;
        response
            .body_mut()
            .read_to_string()
            .map_err(FetchError::Transport)
    }

    /// GET a binary resource body.
    ///
    /// An HTML body under a resource URL is an error page in disguise and is
    /// rejected before anything reaches the filesystem.
    pub fn binary(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!(url, "GET binary");
        let mut response = self.call(url)?;

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();
        if content_type.starts_with("text/html") {
            return Err(FetchError::HtmlBody { content_type });
        }

        response
            .body_mut()
            .with_config()
            .limit(RESOURCE_BODY_LIMIT)
            .read_to_vec()
            .map_err(FetchError::Transport)
    }

    fn call(&self, url: &str) -> Result<ureq::http::Response<ureq::Body>, FetchError> {
        match self.agent.get(url).call() {
            Ok(response) => {
                debug!(url, status = response.status().as_u16(), "response");
                Ok(response)
            }
            Err(ureq::Error::StatusCode(code)) => Err(FetchError::Status(code)),
            Err(source) => Err(FetchError::Transport(source)),
        }
    }
}
