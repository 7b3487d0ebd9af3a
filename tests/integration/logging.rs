//! Integration tests for log redaction

use super::*;
use parking_lot::Mutex;
use serde_json::json;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::fmt::MakeWriter;
use wecom_client::services::AppClient;
use wecom_client::AppConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

const TOKEN: &str = "SECRET-TOKEN-XYZ-123456";
const CORP_SECRET: &str = "corp-secret-value";

/// Collects formatted log output in memory
#[derive(Clone, Default)]
struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn test_token_exchange_logs_are_redacted() {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(capture.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/cgi-bin/gettoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errcode": 0,
            "errmsg": "ok",
            "access_token": TOKEN,
            "expires_in": 7200
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/cgi-bin/message/send"))
        .respond_with(success_response())
        .mount(&mock_server)
        .await;

    let config = AppConfig::builder()
        .corp_id("ww-corp")
        .secret_id(CORP_SECRET)
        .agent_id("1000002")
        .base_url(&mock_server.uri())
        .expect("valid mock server URL")
        .timeout(Duration::from_secs(2))
        .build()
        .expect("valid app config");
    let mut app = AppClient::new(config).expect("Failed to build app client");

    app.send_text("hello", "u1").await.expect("send should succeed");

    let logs = capture.contents();
    assert!(logs.contains("Received response"), "transport debug logs were not captured");
    assert!(logs.contains("SECRET...[REDACTED]"));
    assert!(!logs.contains(TOKEN), "access token leaked into logs:\n{}", logs);
    assert!(!logs.contains(CORP_SECRET), "corp secret leaked into logs:\n{}", logs);
}
