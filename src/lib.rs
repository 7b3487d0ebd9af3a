//! WeCom (Enterprise WeChat) Client
//!
//! A thin client for the WeCom messaging API:
//! - Group robot webhooks (text and markdown messages with mentions)
//! - Application messages to named users, with a cached access token
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use wecom_client::services::{AppClient, GroupRobotClient};
//! use wecom_client::{AppConfig, RobotConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let robot = GroupRobotClient::new(RobotConfig::new("robot-key")?)?;
//!     robot.send_text("Nightly build finished", vec![], vec![]).await?;
//!
//!     let config = AppConfig::builder()
//!         .corp_id("ww0123456789")
//!         .secret_id("app-secret")
//!         .agent_id("1000002")
//!         .build()?;
//!     let mut app = AppClient::new(config)?;
//!     let response = app.send_text("Disk usage above 90%", vec!["zhangsan", "lisi"]).await?;
//!
//!     if !response.is_success() {
//!         eprintln!("WeCom rejected the message: {}", response.errmsg);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// Core modules
pub mod auth;
pub mod config;
pub mod errors;
pub mod transport;
pub mod types;

// Services
pub mod services;

// Observability
pub mod observability;

// Testing utilities
pub mod mocks;

// Tests
#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use config::{AppConfig, AppConfigBuilder, RobotConfig, RobotConfigBuilder};
pub use errors::{WecomError, WecomResult};
pub use services::app::{AppMessage, Receiver};
pub use services::robot::{MentionContent, MessageFormat, RobotMessage};
pub use types::ApiResponse;

/// Default base URL for the WeCom API
pub const DEFAULT_BASE_URL: &str = "https://qyapi.weixin.qq.com";

/// Default timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default access token validity window in seconds
///
/// Configurable through [`AppConfigBuilder::token_validity`].
pub const DEFAULT_TOKEN_VALIDITY_SECS: u64 = 7260;

/// Create a group robot client from environment variables
///
/// Reads `WECOM_ROBOT_KEY`, plus the optional `WECOM_BASE_URL` and `WECOM_TIMEOUT`.
pub fn create_robot_client_from_env() -> WecomResult<services::GroupRobotClient> {
    services::GroupRobotClient::new(RobotConfig::from_env()?)
}

/// Create an application client from environment variables
///
/// Reads `WECOM_CORP_ID`, `WECOM_SECRET` and `WECOM_AGENT_ID`, plus the optional
/// `WECOM_BASE_URL`, `WECOM_TIMEOUT` and `WECOM_TOKEN_VALIDITY_SECS`.
pub fn create_app_client_from_env() -> WecomResult<services::AppClient> {
    services::AppClient::new(AppConfig::from_env()?)
}
