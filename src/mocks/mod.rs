//! Mock implementations for testing.
//!
//! Provides a mock transport that replays canned responses and records
//! every request it receives.

use crate::errors::{ResponseError, WecomError, WecomResult};
use crate::transport::{HttpTransport, TransportRequest};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;

/// Mock response configuration
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// Response body
    pub body: String,
    /// Error to return instead
    pub error: Option<WecomError>,
}

impl MockResponse {
    /// Create a successful JSON response
    pub fn json<T: Serialize>(data: &T) -> Self {
        Self {
            body: serde_json::to_string(data).unwrap_or_default(),
            error: None,
        }
    }

    /// Create a response with raw body
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            error: None,
        }
    }

    /// Create a WeCom success envelope
    pub fn success() -> Self {
        Self::ok(r#"{"errcode":0,"errmsg":"ok"}"#)
    }

    /// Create a WeCom error envelope
    pub fn api_error(errcode: i64, errmsg: &str) -> Self {
        Self::json(&serde_json::json!({ "errcode": errcode, "errmsg": errmsg }))
    }

    /// Create an access token response
    pub fn access_token(token: &str) -> Self {
        Self::json(&serde_json::json!({
            "errcode": 0,
            "errmsg": "ok",
            "access_token": token,
            "expires_in": 7200
        }))
    }

    /// Fail the request with an error
    pub fn error(error: WecomError) -> Self {
        Self {
            body: String::new(),
            error: Some(error),
        }
    }
}

/// Recorded request for verification
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// Request method
    pub method: String,
    /// Query parameters
    pub query: Vec<(String, String)>,
    /// Request body
    pub body: Option<Value>,
    /// Request headers
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Look up a query parameter by name
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Look up a header by name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Mock HTTP transport for testing
pub struct MockHttpTransport {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    default_response: Option<MockResponse>,
}

impl MockHttpTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            default_response: None,
        }
    }

    /// Add a response to the queue
    pub fn add_response(self, response: MockResponse) -> Self {
        self.responses.lock().push_back(response);
        self
    }

    /// Add multiple responses
    pub fn add_responses(self, responses: impl IntoIterator<Item = MockResponse>) -> Self {
        self.responses.lock().extend(responses);
        self
    }

    /// Set default response when queue is empty
    pub fn with_default_response(mut self, response: MockResponse) -> Self {
        self.default_response = Some(response);
        self
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Get the last recorded request
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().last().cloned()
    }

    /// Number of requests sent to URLs ending with `path`
    pub fn request_count(&self, path: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.url.ends_with(path))
            .count()
    }

    /// Clear recorded requests
    pub fn clear_requests(&self) {
        self.requests.lock().clear();
    }

    /// Get remaining response count
    pub fn remaining_responses(&self) -> usize {
        self.responses.lock().len()
    }

    fn record_request(&self, request: &TransportRequest) {
        let headers = request
            .headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        self.requests.lock().push(RecordedRequest {
            url: request.url.clone(),
            method: request.method.to_string(),
            query: request.query.clone(),
            body: request.body.clone(),
            headers,
        });
    }

    fn next_response(&self) -> Option<MockResponse> {
        let mut queue = self.responses.lock();
        queue.pop_front().or_else(|| self.default_response.clone())
    }
}

impl Default for MockHttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send_json(&self, request: TransportRequest) -> WecomResult<Value> {
        self.record_request(&request);

        let response = self.next_response().ok_or_else(|| {
            WecomError::Response(ResponseError::UnexpectedResponse {
                message: "No mock response configured".to_string(),
            })
        })?;

        if let Some(error) = response.error {
            return Err(error);
        }

        serde_json::from_str(&response.body).map_err(|e| WecomError::Response(ResponseError::from(e)))
    }
}

impl std::fmt::Debug for MockHttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockHttpTransport")
            .field("pending_responses", &self.responses.lock().len())
            .field("recorded_requests", &self.requests.lock().len())
            .finish()
    }
}
