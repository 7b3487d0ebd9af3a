//! Request types for the group robot service.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Mention handle that notifies every group member
pub const MENTION_ALL: &str = "@all";

/// Message format accepted by the robot webhook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFormat {
    /// Plain text
    Text,
    /// Markdown subset rendered by WeCom
    Markdown,
}

impl MessageFormat {
    /// Wire name, used both as `msgtype` and as the content key
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageFormat::Text => "text",
            MessageFormat::Markdown => "markdown",
        }
    }
}

impl std::fmt::Display for MessageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message body plus the people to notify
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct MentionContent {
    /// Message body (UTF-8, at most 2048 bytes for text)
    pub content: String,
    /// User IDs to mention
    pub mentioned_list: Vec<String>,
    /// Mobile numbers to mention
    pub mentioned_mobile_list: Vec<String>,
}

impl MentionContent {
    /// Create content with no mentions
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            mentioned_list: Vec::new(),
            mentioned_mobile_list: Vec::new(),
        }
    }
}

/// Message posted through a group robot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RobotMessage {
    /// Plain text message
    Text(MentionContent),
    /// Markdown message
    Markdown(MentionContent),
}

impl RobotMessage {
    /// Create a plain text message
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(MentionContent::new(content))
    }

    /// Create a markdown message
    pub fn markdown(content: impl Into<String>) -> Self {
        Self::Markdown(MentionContent::new(content))
    }

    /// Create a message of the given format
    pub fn with_format(format: MessageFormat, content: MentionContent) -> Self {
        match format {
            MessageFormat::Text => Self::Text(content),
            MessageFormat::Markdown => Self::Markdown(content),
        }
    }

    /// The message format
    pub fn format(&self) -> MessageFormat {
        match self {
            Self::Text(_) => MessageFormat::Text,
            Self::Markdown(_) => MessageFormat::Markdown,
        }
    }

    /// The message body and mentions
    pub fn content(&self) -> &MentionContent {
        match self {
            Self::Text(c) | Self::Markdown(c) => c,
        }
    }

    fn content_mut(&mut self) -> &mut MentionContent {
        match self {
            Self::Text(c) | Self::Markdown(c) => c,
        }
    }

    /// Mention a user by ID
    pub fn mention(mut self, user_id: impl Into<String>) -> Self {
        self.content_mut().mentioned_list.push(user_id.into());
        self
    }

    /// Mention every group member
    pub fn mention_all(self) -> Self {
        self.mention(MENTION_ALL)
    }

    /// Mention a user by mobile number
    pub fn mention_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.content_mut().mentioned_mobile_list.push(mobile.into());
        self
    }

    /// Replace both mention lists
    pub fn mentions(mut self, mentioned_list: Vec<String>, mentioned_mobile_list: Vec<String>) -> Self {
        let content = self.content_mut();
        content.mentioned_list = mentioned_list;
        content.mentioned_mobile_list = mentioned_mobile_list;
        self
    }
}

// {"msgtype": "<fmt>", "<fmt>": {content, mentioned_list, mentioned_mobile_list}}
impl Serialize for RobotMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let format = self.format().as_str();
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("msgtype", format)?;
        map.serialize_entry(format, self.content())?;
        map.end()
    }
}
