//! HTTP transport layer for the WeCom clients.
//!
//! Provides low-level HTTP communication with the WeCom API,
//! including request building and response parsing.

use crate::errors::{NetworkError, ResponseError, WecomError, WecomResult};
use crate::observability::{redact_json, redact_query};
use async_trait::async_trait;
use http::{HeaderMap, Method};
use reqwest::{Client, ClientBuilder, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// HTTP transport trait for making API requests
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a request and parse the response body as JSON
    async fn send_json(&self, request: TransportRequest) -> WecomResult<Value>;
}

/// Transport request for JSON payloads
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method
    pub method: Method,
    /// URL without query string
    pub url: String,
    /// Query parameters
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Option<Value>,
    /// Request timeout
    pub timeout: Option<Duration>,
}

impl TransportRequest {
    /// Create a new POST request with a JSON body
    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: Some(body),
            timeout: None,
        }
    }

    /// Create a new POST request without a body
    pub fn post_empty(url: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
        }
    }

    /// Add a query parameter
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Replace the request headers
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Look up a query parameter by name
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Default HTTP transport implementation using reqwest
pub struct ReqwestTransport {
    client: Client,
    default_timeout: Duration,
}

impl ReqwestTransport {
    /// Create a new transport with the given timeout
    pub fn new(timeout: Duration) -> WecomResult<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .build()
            .map_err(|e| WecomError::Network(NetworkError::Http(e.to_string())))?;

        Ok(Self::with_client(client, timeout))
    }

    /// Create a new transport with a pre-built client
    pub fn with_client(client: Client, default_timeout: Duration) -> Self {
        Self {
            client,
            default_timeout,
        }
    }

    async fn parse_response(&self, response: Response) -> WecomResult<Value> {
        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Request failed with non-success status");
        }

        let body = response
            .text()
            .await
            .map_err(|e| WecomError::Network(NetworkError::from(e)))?;

        let value: Value = serde_json::from_str(&body).map_err(|e| {
            debug!(body_len = body.len(), "Response body is not JSON");
            WecomError::Response(ResponseError::from(e))
        })?;

        debug!(response_body = %redact_json(&value), "Received response");
        Ok(value)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(
        skip(self, request),
        fields(method = %request.method, url = %request.url, query = %redact_query(&request.query))
    )]
    async fn send_json(&self, request: TransportRequest) -> WecomResult<Value> {
        let timeout = request.timeout.unwrap_or(self.default_timeout);

        let mut req_builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers)
            .timeout(timeout);

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        // `json` keeps an explicitly set Content-Type
        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| WecomError::Network(NetworkError::from(e)))?;

        self.parse_response(response).await
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("default_timeout", &self.default_timeout)
            .finish()
    }
}
