//! HTTP transport abstraction and its `reqwest` implementation.
//!
//! Operations only build [`RestRequest`]s; sending them and translating
//! non-2xx responses into [`ValidationError`]s is the transport's job.

use std::time::Duration;

use async_trait::async_trait;
use http::{HeaderMap, Method};
use propval_core::ValidationError;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ClientError;

/// A fully formed API request.
#[derive(Debug, Clone)]
pub struct RestRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    /// JSON body. The `Content-Type` header is expected in `headers`.
    pub body: Option<Value>,
}

impl RestRequest {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            method,
            url: url.into(),
            headers,
            body: None,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Pluggable HTTP transport.
///
/// Implementations must return [`ClientError::Api`] for non-2xx responses,
/// built with [`ValidationError::from_response`].
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Sends the request and returns the JSON body. An empty body is
    /// returned as `Value::Null`.
    async fn send(&self, request: RestRequest) -> Result<Value, ClientError>;
}

// ---------------------------------------------------------------------------
// ReqwestRestClient
// ---------------------------------------------------------------------------

/// [`RestClient`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestRestClient {
    client: reqwest::Client,
}

impl ReqwestRestClient {
    /// Creates a transport whose requests time out after `request_timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(request_timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Wraps an existing client, e.g. one configured with a proxy.
    #[must_use]
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RestClient for ReqwestRestClient {
    async fn send(&self, request: RestRequest) -> Result<Value, ClientError> {
        let RestRequest {
            method,
            url,
            headers,
            body,
        } = request;

        debug!(%method, %url, "sending API request");
        let mut builder = self.client.request(method.clone(), &url).headers(headers);
        if let Some(body) = &body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let body = serde_json::from_slice::<Value>(&bytes).ok();
            let err = ValidationError::from_response(Some(status.as_u16()), body.as_ref());
            warn!(
                %method,
                %url,
                status = status.as_u16(),
                code = %err.code,
                "API request failed"
            );
            return Err(err.into());
        }

        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
