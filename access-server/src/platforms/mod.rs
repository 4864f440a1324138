//! External platform clients
//!
//! Each client issues exactly one HTTP call per operation with the shared,
//! timeout-bounded `reqwest::Client`. Responses are reduced to
//! [`UpstreamResponse`] and classified by [`normalize`].

pub mod atlas;
pub mod github;

pub use atlas::AtlasClient;
pub use github::{GitHubApi, GitHubClient};

use reqwest::Url;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// User-Agent sent on every outbound call (GitHub rejects requests without one)
pub const USER_AGENT: &str = concat!("access-server/", env!("CARGO_PKG_VERSION"));

/// Transport-level failures; no HTTP status was received
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("platform request timed out")]
    Timeout,

    #[error("platform request failed: {0}")]
    Network(String),

    #[error("invalid platform base URL: {0}")]
    InvalidBaseUrl(String),
}

impl From<reqwest::Error> for PlatformError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PlatformError::Timeout
        } else {
            PlatformError::Network(err.to_string())
        }
    }
}

/// Raw status and body of one platform call
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: u16,
    /// JSON body; non-JSON bodies are kept as a string, empty bodies are `None`
    pub body: Option<Value>,
}

impl UpstreamResponse {
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self, PlatformError> {
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = if bytes.is_empty() {
            None
        } else {
            Some(
                serde_json::from_slice(&bytes)
                    .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned())),
            )
        };
        Ok(Self { status, body })
    }
}

/// Classified platform response
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 2xx
    Success { status: u16, body: Option<Value> },
    /// 404: the platform does not know the account (or target)
    AccountNotFound { body: Option<Value> },
    /// 403: credential invalid or missing scope
    Forbidden { body: Option<Value> },
    /// Anything else
    UpstreamError { status: u16, body: Option<Value> },
}

/// Map a platform response onto an [`Outcome`]
pub fn normalize(response: UpstreamResponse) -> Outcome {
    let UpstreamResponse { status, body } = response;
    match status {
        200..=299 => Outcome::Success { status, body },
        404 => Outcome::AccountNotFound { body },
        403 => Outcome::Forbidden { body },
        _ => Outcome::UpstreamError { status, body },
    }
}

/// Build the shared outbound HTTP client
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, PlatformError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(PlatformError::from)
}

pub(crate) fn parse_base_url(base: &str) -> Result<Url, PlatformError> {
    Url::parse(base.trim()).map_err(|e| PlatformError::InvalidBaseUrl(format!("{base}: {e}")))
}

/// Append percent-encoded path segments to a base URL
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, PlatformError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| PlatformError::InvalidBaseUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
