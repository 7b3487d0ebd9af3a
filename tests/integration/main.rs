//! Integration tests using WireMock
//!
//! These tests drive the clients through the real reqwest transport against a
//! mock HTTP server, covering query strings, headers and JSON bodies on the wire.

mod app;
mod logging;
mod robot;

use wiremock::{MockServer, ResponseTemplate};

/// Helper to start a mock server
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Helper to create a WeCom success response
pub fn success_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({"errcode": 0, "errmsg": "ok"}))
}

/// Helper to create a WeCom error response
pub fn error_response(errcode: i64, errmsg: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_json(serde_json::json!({"errcode": errcode, "errmsg": errmsg}))
}
