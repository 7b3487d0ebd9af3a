//! Group robot service implementation.

use super::*;
use crate::config::RobotConfig;
use crate::errors::{RequestError, WecomResult};
use crate::services::inspect_send_response;
use crate::transport::{HttpTransport, ReqwestTransport, TransportRequest};
use crate::types::ApiResponse;
use async_trait::async_trait;
use http::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use std::sync::Arc;
use tracing::instrument;

/// Webhook endpoint path
pub const WEBHOOK_ENDPOINT: &str = "cgi-bin/webhook/send";

/// Trait for group robot operations
#[async_trait]
pub trait GroupRobotClientTrait: Send + Sync {
    /// Post a message to the robot's group
    async fn send(&self, message: RobotMessage) -> WecomResult<ApiResponse>;
}

/// Client for a single group robot webhook
#[derive(Clone)]
pub struct GroupRobotClient {
    config: Arc<RobotConfig>,
    transport: Arc<dyn HttpTransport>,
}

impl GroupRobotClient {
    /// Create a new robot client
    pub fn new(config: RobotConfig) -> WecomResult<Self> {
        let transport = Arc::new(ReqwestTransport::new(config.timeout)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Create a new robot client with a custom transport
    pub fn with_transport(config: RobotConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    /// Post a plain text message
    pub async fn send_text(
        &self,
        content: impl Into<String>,
        mentioned_list: Vec<String>,
        mentioned_mobile_list: Vec<String>,
    ) -> WecomResult<ApiResponse> {
        let message = RobotMessage::text(content).mentions(mentioned_list, mentioned_mobile_list);
        self.send(message).await
    }

    /// Post a markdown message
    pub async fn send_markdown(
        &self,
        content: impl Into<String>,
        mentioned_list: Vec<String>,
        mentioned_mobile_list: Vec<String>,
    ) -> WecomResult<ApiResponse> {
        let message = RobotMessage::markdown(content).mentions(mentioned_list, mentioned_mobile_list);
        self.send(message).await
    }
}

#[async_trait]
impl GroupRobotClientTrait for GroupRobotClient {
    #[instrument(skip(self, message), fields(msgtype = %message.format()))]
    async fn send(&self, message: RobotMessage) -> WecomResult<ApiResponse> {
        let body = serde_json::to_value(&message).map_err(RequestError::from)?;

        // Body is JSON, header stays text/plain
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        let request = TransportRequest::post(self.config.build_url(WEBHOOK_ENDPOINT), body)
            .query("key", self.config.expose_key())
            .with_headers(headers)
            .with_timeout(self.config.timeout);

        let response = self.transport.send_json(request).await?;
        inspect_send_response(WEBHOOK_ENDPOINT, response)
    }
}

impl std::fmt::Debug for GroupRobotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupRobotClient")
            .field("config", &self.config)
            .finish()
    }
}
