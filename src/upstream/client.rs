//! Outbound HTTP client abstraction.
//!
//! # Responsibilities
//! - Describe a single upstream fetch as a value (`UpstreamRequest`)
//! - Perform the fetch exactly once (no retries, no circuit breaking)
//! - Return status, content type, and raw body for the caller to relay
//!
//! # Design Decisions
//! - Trait object seam so tests can count and script fetches
//! - Transport failures collapse to one error type; callers decide
//!   what (if anything) of it reaches the client

use std::time::Duration;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::{header, Method, StatusCode};
use thiserror::Error;

/// Network-level failure talking to an upstream. The message is for
/// server-side logs only; clients get a generic body.
#[derive(Debug, Error)]
#[error("upstream transport failure: {0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest error display never includes credentials (they travel
        // in headers, not in the URL).
        TransportError(err.to_string())
    }
}

/// Description of one outbound fetch.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub method: Method,
    pub url: String,
    pub accept_json: bool,
    pub bearer_token: Option<String>,
    pub user_agent: Option<String>,
    pub json_body: Option<serde_json::Value>,
}

impl UpstreamRequest {
    /// Plain GET with no extra headers.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            accept_json: false,
            bearer_token: None,
            user_agent: None,
            json_body: None,
        }
    }

    /// PATCH carrying a JSON payload.
    pub fn patch_json(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::PATCH,
            url: url.into(),
            accept_json: true,
            bearer_token: None,
            user_agent: None,
            json_body: Some(body),
        }
    }

    /// Request `application/json` responses.
    pub fn accept_json(mut self) -> Self {
        self.accept_json = true;
        self
    }

    /// Attach a bearer token.
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Set an identifying User-Agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }
}

/// Response from one outbound fetch, fully buffered.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// The single seam between request handlers and the network.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Perform the described fetch exactly once.
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, TransportError>;
}

/// Production `UpstreamClient` backed by reqwest.
pub struct HttpUpstream {
    client: reqwest::Client,
}

impl HttpUpstream {
    /// Build a client with the given total request timeout.
    pub fn new(request_timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(TransportError::from)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstream {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, TransportError> {
        let mut builder = self.client.request(request.method.clone(), request.url.as_str());

        if request.accept_json {
            builder = builder.header(header::ACCEPT, "application/json");
        }
        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(agent) = &request.user_agent {
            builder = builder.header(header::USER_AGENT, agent);
        }
        if let Some(body) = &request.json_body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        let body = response.bytes().await?;

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}
