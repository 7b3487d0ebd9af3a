//! Configuration management for the WeCom clients.
//!
//! Supports configuration via:
//! - Builder pattern
//! - Environment variables

use crate::errors::{ConfigurationError, WecomResult};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

fn default_base_url() -> Url {
    Url::parse(crate::DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL")
}

fn parse_base_url(url: &str) -> Result<Url, ConfigurationError> {
    Url::parse(url).map_err(|e| ConfigurationError::InvalidConfiguration {
        message: format!("Invalid URL: {}", e),
    })
}

fn join_url(base_url: &Url, endpoint: &str) -> String {
    let base = base_url.as_str().trim_end_matches('/');
    let path = endpoint.trim_start_matches('/');
    format!("{}/{}", base, path)
}

fn env_timeout() -> Option<Duration> {
    std::env::var("WECOM_TIMEOUT")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Configuration for the application message client
#[derive(Clone)]
pub struct AppConfig {
    pub(crate) corp_id: String,
    pub(crate) secret_id: SecretString,
    pub(crate) agent_id: String,
    /// Base URL for API requests
    pub base_url: Url,
    /// Request timeout
    pub timeout: Duration,
    /// How long an acquired access token is trusted before refreshing
    pub token_validity: Duration,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("corp_id", &self.corp_id)
            .field("secret_id", &"[REDACTED]")
            .field("agent_id", &self.agent_id)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("token_validity", &self.token_validity)
            .finish()
    }
}

impl AppConfig {
    /// Create a new configuration builder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::new()
    }

    /// Create configuration from environment variables
    ///
    /// Reads:
    /// - `WECOM_CORP_ID` - Corporation ID
    /// - `WECOM_SECRET` - Application secret
    /// - `WECOM_AGENT_ID` - Application agent ID
    /// - `WECOM_BASE_URL` - API base URL override
    /// - `WECOM_TIMEOUT` - Request timeout in seconds
    /// - `WECOM_TOKEN_VALIDITY_SECS` - Access token validity window
    pub fn from_env() -> WecomResult<Self> {
        let mut builder = AppConfigBuilder::new();

        if let Ok(id) = std::env::var("WECOM_CORP_ID") {
            builder = builder.corp_id(&id);
        }
        if let Ok(secret) = std::env::var("WECOM_SECRET") {
            builder = builder.secret_id(&secret);
        }
        if let Ok(agent) = std::env::var("WECOM_AGENT_ID") {
            builder = builder.agent_id(&agent);
        }
        if let Ok(url) = std::env::var("WECOM_BASE_URL") {
            builder = builder.base_url(&url)?;
        }
        if let Some(timeout) = env_timeout() {
            builder = builder.timeout(timeout);
        }
        if let Ok(validity) = std::env::var("WECOM_TOKEN_VALIDITY_SECS") {
            if let Ok(secs) = validity.parse::<u64>() {
                builder = builder.token_validity(Duration::from_secs(secs));
            }
        }

        builder.build()
    }

    /// Corporation ID
    pub fn corp_id(&self) -> &str {
        &self.corp_id
    }

    /// Application agent ID
    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    pub(crate) fn expose_secret(&self) -> &str {
        self.secret_id.expose_secret()
    }

    /// Build the full URL for an endpoint
    pub fn build_url(&self, endpoint: &str) -> String {
        join_url(&self.base_url, endpoint)
    }
}

/// Builder for AppConfig
pub struct AppConfigBuilder {
    corp_id: Option<String>,
    secret_id: Option<SecretString>,
    agent_id: Option<String>,
    base_url: Url,
    timeout: Duration,
    token_validity: Duration,
}

impl Default for AppConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            corp_id: None,
            secret_id: None,
            agent_id: None,
            base_url: default_base_url(),
            timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT_SECS),
            token_validity: Duration::from_secs(crate::DEFAULT_TOKEN_VALIDITY_SECS),
        }
    }

    /// Set the corporation ID
    pub fn corp_id(mut self, id: &str) -> Self {
        self.corp_id = Some(id.to_string());
        self
    }

    /// Set the application secret
    pub fn secret_id(mut self, secret: &str) -> Self {
        self.secret_id = Some(SecretString::new(secret.to_string()));
        self
    }

    /// Set the application agent ID
    pub fn agent_id(mut self, id: &str) -> Self {
        self.agent_id = Some(id.to_string());
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: &str) -> Result<Self, ConfigurationError> {
        self.base_url = parse_base_url(url)?;
        Ok(self)
    }

    /// Set the timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the access token validity window
    pub fn token_validity(mut self, validity: Duration) -> Self {
        self.token_validity = validity;
        self
    }

    /// Build the configuration
    pub fn build(self) -> WecomResult<AppConfig> {
        let corp_id = self
            .corp_id
            .filter(|v| !v.is_empty())
            .ok_or(ConfigurationError::MissingField { field: "corp_id" })?;
        let secret_id = self
            .secret_id
            .filter(|v| !v.expose_secret().is_empty())
            .ok_or(ConfigurationError::MissingField { field: "secret_id" })?;
        let agent_id = self
            .agent_id
            .filter(|v| !v.is_empty())
            .ok_or(ConfigurationError::MissingField { field: "agent_id" })?;

        if self.token_validity.is_zero() {
            return Err(ConfigurationError::InvalidConfiguration {
                message: "token_validity must be greater than zero".to_string(),
            }
            .into());
        }

        Ok(AppConfig {
            corp_id,
            secret_id,
            agent_id,
            base_url: self.base_url,
            timeout: self.timeout,
            token_validity: self.token_validity,
        })
    }
}

/// Configuration for the group robot webhook client
#[derive(Clone)]
pub struct RobotConfig {
    pub(crate) key: SecretString,
    /// Base URL for API requests
    pub base_url: Url,
    /// Request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for RobotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RobotConfig")
            .field("key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl RobotConfig {
    /// Create a configuration for a robot key with default endpoint settings
    pub fn new(key: &str) -> WecomResult<Self> {
        RobotConfigBuilder::new().key(key).build()
    }

    /// Create a new configuration builder
    pub fn builder() -> RobotConfigBuilder {
        RobotConfigBuilder::new()
    }

    /// Create configuration from environment variables
    ///
    /// Reads `WECOM_ROBOT_KEY`, `WECOM_BASE_URL` and `WECOM_TIMEOUT`.
    pub fn from_env() -> WecomResult<Self> {
        let mut builder = RobotConfigBuilder::new();

        if let Ok(key) = std::env::var("WECOM_ROBOT_KEY") {
            builder = builder.key(&key);
        }
        if let Ok(url) = std::env::var("WECOM_BASE_URL") {
            builder = builder.base_url(&url)?;
        }
        if let Some(timeout) = env_timeout() {
            builder = builder.timeout(timeout);
        }

        builder.build()
    }

    pub(crate) fn expose_key(&self) -> &str {
        self.key.expose_secret()
    }

    /// Build the full URL for an endpoint
    pub fn build_url(&self, endpoint: &str) -> String {
        join_url(&self.base_url, endpoint)
    }
}

/// Builder for RobotConfig
pub struct RobotConfigBuilder {
    key: Option<SecretString>,
    base_url: Url,
    timeout: Duration,
}

impl Default for RobotConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RobotConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            key: None,
            base_url: default_base_url(),
            timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set the robot webhook key
    pub fn key(mut self, key: &str) -> Self {
        self.key = Some(SecretString::new(key.to_string()));
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: &str) -> Result<Self, ConfigurationError> {
        self.base_url = parse_base_url(url)?;
        Ok(self)
    }

    /// Set the timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the configuration
    pub fn build(self) -> WecomResult<RobotConfig> {
        let key = self
            .key
            .filter(|k| !k.expose_secret().is_empty())
            .ok_or(ConfigurationError::MissingField { field: "key" })?;

        Ok(RobotConfig {
            key,
            base_url: self.base_url,
            timeout: self.timeout,
        })
    }
}
