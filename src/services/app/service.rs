//! Application message service implementation.

use super::*;
use crate::auth::{AccessTokenCache, TokenManager};
use crate::config::AppConfig;
use crate::errors::{RequestError, WecomResult};
use crate::services::inspect_send_response;
use crate::transport::{HttpTransport, ReqwestTransport, TransportRequest};
use crate::types::ApiResponse;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Message endpoint path
pub const MESSAGE_ENDPOINT: &str = "cgi-bin/message/send";

/// Trait for application message operations
#[async_trait]
pub trait AppClientTrait: Send {
    /// Send a message, refreshing the access token first if needed
    async fn send(&mut self, message: AppMessage) -> WecomResult<ApiResponse>;
}

/// Client sending messages on behalf of one WeCom application
pub struct AppClient {
    config: Arc<AppConfig>,
    transport: Arc<dyn HttpTransport>,
    tokens: TokenManager,
}

impl AppClient {
    /// Create a new application client
    pub fn new(config: AppConfig) -> WecomResult<Self> {
        let transport = Arc::new(ReqwestTransport::new(config.timeout)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Create a new application client with a custom transport
    pub fn with_transport(config: AppConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let config = Arc::new(config);
        let tokens = TokenManager::new(config.clone(), transport.clone());
        Self {
            config,
            transport,
            tokens,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The access token cache
    pub fn token_cache(&self) -> &AccessTokenCache {
        self.tokens.cache()
    }

    #[cfg(test)]
    pub(crate) fn token_cache_mut(&mut self) -> &mut AccessTokenCache {
        self.tokens.cache_mut()
    }

    /// Return a valid access token, fetching a new one if needed
    pub async fn access_token(&mut self) -> WecomResult<String> {
        self.tokens.access_token().await
    }

    /// Fetch a new access token regardless of the cached one
    pub async fn refresh_access_token(&mut self) -> WecomResult<String> {
        self.tokens.refresh().await
    }

    /// Drop the cached access token so the next send fetches a new one
    pub fn invalidate_token(&mut self) {
        self.tokens.cache_mut().clear();
    }

    /// Send a text message to one or more users
    pub async fn send_text(
        &mut self,
        message: impl Into<String>,
        receiver: impl Into<Receiver>,
    ) -> WecomResult<ApiResponse> {
        self.send(AppMessage::text(message, receiver)).await
    }
}

#[async_trait]
impl AppClientTrait for AppClient {
    #[instrument(skip(self, message), fields(agent_id = %self.config.agent_id()))]
    async fn send(&mut self, message: AppMessage) -> WecomResult<ApiResponse> {
        let body = SendTextRequest::new(message, self.config.agent_id());
        let body = serde_json::to_value(&body).map_err(RequestError::from)?;

        let token = self.tokens.access_token().await?;

        let request = TransportRequest::post(self.config.build_url(MESSAGE_ENDPOINT), body)
            .query("access_token", token)
            .with_timeout(self.config.timeout);

        let response = self.transport.send_json(request).await?;
        inspect_send_response(MESSAGE_ENDPOINT, response)
    }
}

impl std::fmt::Debug for AppClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppClient")
            .field("config", &self.config)
            .field("tokens", &self.tokens)
            .finish()
    }
}
