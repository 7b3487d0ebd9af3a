//! Request types for the application message service.

use serde::Serialize;
use serde_json::Value;

/// Separator WeCom uses between user IDs in `touser`
pub const RECEIVER_SEPARATOR: &str = "|";

/// Receiver that addresses every member visible to the application
pub const ALL_USERS: &str = "@all";

/// Who an application message is addressed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Receiver {
    /// A single user ID, or an already `|`-joined list
    Single(String),
    /// Several user IDs
    Many(Vec<String>),
}

impl Receiver {
    /// Every member visible to the application
    pub fn all() -> Self {
        Self::Single(ALL_USERS.to_string())
    }

    /// Render as the `touser` field
    pub fn to_touser(&self) -> String {
        match self {
            Self::Single(id) => id.clone(),
            Self::Many(ids) => ids.join(RECEIVER_SEPARATOR),
        }
    }
}

impl From<&str> for Receiver {
    fn from(id: &str) -> Self {
        Self::Single(id.to_string())
    }
}

impl From<String> for Receiver {
    fn from(id: String) -> Self {
        Self::Single(id)
    }
}

impl From<Vec<String>> for Receiver {
    fn from(ids: Vec<String>) -> Self {
        Self::Many(ids)
    }
}

impl From<Vec<&str>> for Receiver {
    fn from(ids: Vec<&str>) -> Self {
        Self::Many(ids.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for Receiver {
    fn from(ids: &[&str]) -> Self {
        Self::Many(ids.iter().map(|s| s.to_string()).collect())
    }
}

/// Text message to send through the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppMessage {
    /// Message body
    pub content: String,
    /// Recipients
    pub receiver: Receiver,
}

impl AppMessage {
    /// Create a text message
    pub fn text(content: impl Into<String>, receiver: impl Into<Receiver>) -> Self {
        Self {
            content: content.into(),
            receiver: receiver.into(),
        }
    }
}

/// Text body
#[derive(Debug, Clone, Serialize)]
pub struct TextBody {
    /// Message body
    pub content: String,
}

/// Body of `message/send` for a text message
#[derive(Debug, Clone, Serialize)]
pub struct SendTextRequest {
    /// `|`-joined recipient IDs
    pub touser: String,
    /// Always `text`
    pub msgtype: &'static str,
    /// Application agent ID
    pub agentid: Value,
    /// Message body
    pub text: TextBody,
    /// Confidential message flag, always `"0"`
    pub safe: &'static str,
}

impl SendTextRequest {
    /// Build the request body for a message
    ///
    /// Numeric agent IDs are sent as JSON numbers, anything else verbatim.
    pub fn new(message: AppMessage, agent_id: &str) -> Self {
        let agentid = agent_id
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::from(agent_id));

        Self {
            touser: message.receiver.to_touser(),
            msgtype: "text",
            agentid,
            text: TextBody {
                content: message.content,
            },
            safe: "0",
        }
    }
}
