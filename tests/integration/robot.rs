//! Integration tests for the group robot webhook

use super::*;
use serde_json::json;
use std::time::Duration;
use wecom_client::services::{GroupRobotClient, GroupRobotClientTrait};
use wecom_client::{RobotConfig, RobotMessage, WecomError};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn robot_for(server_uri: &str) -> GroupRobotClient {
    let config = RobotConfig::builder()
        .key("693a91f6-7xxx-4bc4-97a0-0ec2sifa5aaa")
        .base_url(server_uri)
        .expect("valid mock server URL")
        .timeout(Duration::from_secs(2))
        .build()
        .expect("valid robot config");

    GroupRobotClient::new(config).expect("Failed to build robot client")
}

#[tokio::test]
async fn test_text_message_on_the_wire() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/cgi-bin/webhook/send"))
        .and(query_param("key", "693a91f6-7xxx-4bc4-97a0-0ec2sifa5aaa"))
        .and(header("content-type", "text/plain"))
        .and(body_json(json!({
            "msgtype": "text",
            "text": {
                "content": "hello world",
                "mentioned_list": ["wangqing", "@all"],
                "mentioned_mobile_list": ["13800001111"]
            }
        })))
        .respond_with(success_response())
        .expect(1)
        .mount(&mock_server)
        .await;

    let robot = robot_for(&mock_server.uri());
    let response = robot
        .send_text(
            "hello world",
            vec!["wangqing".to_string(), "@all".to_string()],
            vec!["13800001111".to_string()],
        )
        .await
        .expect("send should succeed");

    assert!(response.is_success());
}

#[tokio::test]
async fn test_markdown_message_on_the_wire() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/cgi-bin/webhook/send"))
        .and(body_json(json!({
            "msgtype": "markdown",
            "markdown": {
                "content": "## Alert\n>cpu: <font color=\"warning\">95%</font>",
                "mentioned_list": [],
                "mentioned_mobile_list": []
            }
        })))
        .respond_with(success_response())
        .expect(1)
        .mount(&mock_server)
        .await;

    let robot = robot_for(&mock_server.uri());
    let response = robot
        .send(RobotMessage::markdown(
            "## Alert\n>cpu: <font color=\"warning\">95%</font>",
        ))
        .await
        .expect("send should succeed");

    assert!(response.is_success());
}

#[tokio::test]
async fn test_provider_error_is_returned() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/cgi-bin/webhook/send"))
        .respond_with(error_response(93000, "invalid webhook url, hint: [1672999]"))
        .mount(&mock_server)
        .await;

    let robot = robot_for(&mock_server.uri());
    let response = robot
        .send_text("hello", vec![], vec![])
        .await
        .expect("provider errors are not transport errors");

    assert_eq!(response.errcode, 93000);
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_non_json_body_is_response_error() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/cgi-bin/webhook/send"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let robot = robot_for(&mock_server.uri());
    let result = robot.send_text("hello", vec![], vec![]).await;

    assert!(matches!(result, Err(WecomError::Response(_))));
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/cgi-bin/webhook/send"))
        .respond_with(success_response().set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let robot = robot_for(&mock_server.uri());
    let result = robot.send_text("hello", vec![], vec![]).await;

    assert!(matches!(result, Err(WecomError::Network(_))));
}
