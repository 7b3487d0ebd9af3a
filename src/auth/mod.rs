//! Access token management for the application message client.
//!
//! WeCom issues a bearer token in exchange for the corp id and application
//! secret. The token is cached together with its acquisition time and is
//! trusted for a fixed window, after which the next send refreshes it.

use crate::config::AppConfig;
use crate::errors::{AuthenticationError, ResponseError, WecomError, WecomResult};
use crate::observability::redact_token;
use crate::transport::{HttpTransport, TransportRequest};
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Token endpoint path
pub const TOKEN_ENDPOINT: &str = "cgi-bin/gettoken";

/// Response from the token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Error code (0 = success)
    #[serde(default)]
    pub errcode: i64,
    /// Error message
    #[serde(default)]
    pub errmsg: String,
    /// Issued access token
    #[serde(default)]
    pub access_token: Option<String>,
    /// Provider-reported lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Cached access token and the moment it was acquired
pub struct AccessTokenCache {
    token: Option<SecretString>,
    acquired_at: Option<DateTime<Utc>>,
    validity: Duration,
}

impl AccessTokenCache {
    /// Create an empty cache with the given validity window
    pub fn new(validity: Duration) -> Self {
        Self {
            token: None,
            acquired_at: None,
            validity,
        }
    }

    /// The validity window
    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// When the cached token was acquired
    pub fn acquired_at(&self) -> Option<DateTime<Utc>> {
        self.acquired_at
    }

    /// Whether the cached token can be used right now
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Whether the cached token can be used at `now`
    ///
    /// Valid iff the token is non-empty and `0 < now - acquired_at < validity`.
    /// An acquisition time in the future counts as expired.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        let (Some(token), Some(acquired_at)) = (&self.token, self.acquired_at) else {
            return false;
        };
        if token.expose_secret().is_empty() {
            return false;
        }

        let elapsed = now - acquired_at;
        if elapsed <= chrono::Duration::zero() {
            return false;
        }

        match chrono::Duration::from_std(self.validity) {
            Ok(window) => elapsed < window,
            Err(_) => true,
        }
    }

    /// The cached token if it is still valid
    pub fn current(&self) -> Option<&str> {
        if self.is_valid() {
            self.token.as_ref().map(|t| t.expose_secret().as_str())
        } else {
            None
        }
    }

    /// Store a freshly acquired token
    pub fn store(&mut self, token: impl Into<String>, acquired_at: DateTime<Utc>) {
        self.token = Some(SecretString::new(token.into()));
        self.acquired_at = Some(acquired_at);
    }

    /// Drop the cached token
    pub fn clear(&mut self) {
        self.token = None;
        self.acquired_at = None;
    }
}

impl std::fmt::Debug for AccessTokenCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenCache")
            .field("has_token", &self.token.is_some())
            .field("acquired_at", &self.acquired_at)
            .field("validity", &self.validity)
            .finish()
    }
}

/// Fetches access tokens and keeps the cache current
pub struct TokenManager {
    config: Arc<AppConfig>,
    transport: Arc<dyn HttpTransport>,
    cache: AccessTokenCache,
}

impl TokenManager {
    /// Create a new token manager with an empty cache
    pub fn new(config: Arc<AppConfig>, transport: Arc<dyn HttpTransport>) -> Self {
        let cache = AccessTokenCache::new(config.token_validity);
        Self {
            config,
            transport,
            cache,
        }
    }

    /// The token cache
    pub fn cache(&self) -> &AccessTokenCache {
        &self.cache
    }

    /// Mutable access to the token cache
    pub fn cache_mut(&mut self) -> &mut AccessTokenCache {
        &mut self.cache
    }

    /// Return a valid access token, refreshing the cache when needed
    pub async fn access_token(&mut self) -> WecomResult<String> {
        if let Some(token) = self.cache.current() {
            debug!("Reusing cached access token");
            return Ok(token.to_string());
        }

        debug!(
            acquired_at = ?self.cache.acquired_at(),
            "Access token absent or expired, refreshing"
        );
        self.refresh().await
    }

    /// Fetch a new access token unconditionally
    #[instrument(skip(self), fields(corp_id = %self.config.corp_id()))]
    pub async fn refresh(&mut self) -> WecomResult<String> {
        let request = TransportRequest::post_empty(self.config.build_url(TOKEN_ENDPOINT))
            .query("corpid", self.config.corp_id())
            .query("corpsecret", self.config.expose_secret())
            .with_timeout(self.config.timeout);

        let body = self.transport.send_json(request).await?;
        let response: TokenResponse = serde_json::from_value(body)
            .map_err(|e| WecomError::Response(ResponseError::from(e)))?;

        if response.errcode != 0 {
            warn!(
                errcode = response.errcode,
                errmsg = %response.errmsg,
                "Access token request rejected"
            );
            return Err(AuthenticationError::TokenRequestFailed {
                errcode: response.errcode,
                errmsg: response.errmsg,
            }
            .into());
        }

        let token = response
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(AuthenticationError::MissingAccessToken)?;

        info!(
            token = %redact_token(&token),
            expires_in = ?response.expires_in,
            "Access token refreshed"
        );
        self.cache.store(token.clone(), Utc::now());
        Ok(token)
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("corp_id", &self.config.corp_id())
            .field("cache", &self.cache)
            .finish()
    }
}
