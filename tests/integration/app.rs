//! Integration tests for application messages

use super::*;
use serde_json::json;
use std::time::Duration;
use wecom_client::services::AppClient;
use wecom_client::{AppConfig, WecomError};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn app_for(server_uri: &str) -> AppClient {
    let config = AppConfig::builder()
        .corp_id("ww-corp")
        .secret_id("corp-secret")
        .agent_id("1000002")
        .base_url(server_uri)
        .expect("valid mock server URL")
        .timeout(Duration::from_secs(2))
        .build()
        .expect("valid app config");

    AppClient::new(config).expect("Failed to build app client")
}

fn token_response(token: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "errcode": 0,
        "errmsg": "ok",
        "access_token": token,
        "expires_in": 7200
    }))
}

#[tokio::test]
async fn test_token_exchange_then_send() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/cgi-bin/gettoken"))
        .and(query_param("corpid", "ww-corp"))
        .and(query_param("corpsecret", "corp-secret"))
        .respond_with(token_response("wire-token"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/cgi-bin/message/send"))
        .and(query_param("access_token", "wire-token"))
        .and(body_json(json!({
            "touser": "chongdanpan|yifanyang|qifangsu",
            "msgtype": "text",
            "agentid": 1000002,
            "text": {"content": "job finished"},
            "safe": "0"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errcode": 0,
            "errmsg": "ok",
            "invaliduser": "",
            "msgid": "xxxx"
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server.uri());
    let receivers = vec!["chongdanpan", "yifanyang", "qifangsu"];

    let response = app
        .send_text("job finished", receivers.clone())
        .await
        .expect("send should succeed");
    assert!(response.is_success());
    assert_eq!(response.get("msgid"), Some(&json!("xxxx")));

    tokio::time::sleep(Duration::from_millis(5)).await;
    app.send_text("job finished", receivers)
        .await
        .expect("second send should reuse the token");
}

#[tokio::test]
async fn test_rejected_credentials() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/cgi-bin/gettoken"))
        .respond_with(error_response(40001, "invalid credential"))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/cgi-bin/message/send"))
        .respond_with(success_response())
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server.uri());
    let err = app.send_text("hi", "u1").await.unwrap_err();

    assert_eq!(err.errcode(), Some(40001));
    assert!(matches!(err, WecomError::Authentication(_)));
}
