//! Platform-neutral chat message model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ChannelError;

/// Bot display name on both platforms.
pub const BOT_USERNAME: &str = "Digest Bot";

/// Item cap for the bullets style.
pub const BULLETS_MAX_ITEMS: usize = 10;

/// Item cap for the summary style.
pub const SUMMARY_MAX_ITEMS: usize = 5;

/// Item cap for the highlights style.
pub const HIGHLIGHTS_MAX_ITEMS: usize = 5;

/// Characters kept from each summary in the bullets style.
pub const BULLET_SUMMARY_CHARS: usize = 100;

/// Characters kept from each summary in the summary style.
pub const FIELD_SUMMARY_CHARS: usize = 150;

/// Chat platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Slack,
    Discord,
}

impl Platform {
    /// Get all platforms.
    #[must_use]
    pub fn all() -> &'static [Platform] {
        &[Platform::Slack, Platform::Discord]
    }

    /// Parse a platform name; unknown names are an error.
    pub fn parse(s: &str) -> Result<Self, ChannelError> {
        match s.trim().to_lowercase().as_str() {
            "slack" => Ok(Platform::Slack),
            "discord" => Ok(Platform::Discord),
            other => Err(ChannelError::UnknownPlatform(other.to_string())),
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Platform::Slack => "slack",
            Platform::Discord => "discord",
        }
    }

    /// Environment variable holding this platform's webhook URL.
    #[must_use]
    pub const fn webhook_env_var(&self) -> &'static str {
        match self {
            Platform::Slack => "SLACK_WEBHOOK_URL",
            Platform::Discord => "DISCORD_WEBHOOK_URL",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compact layout of a chat digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MessageStyle {
    /// Header, one line per item with a short summary, footer.
    #[default]
    Bullets,
    /// One attachment/embed with a field per item.
    Summary,
    /// Titles only.
    Highlights,
}

impl MessageStyle {
    /// Get all styles.
    #[must_use]
    pub fn all() -> &'static [MessageStyle] {
        &[
            MessageStyle::Bullets,
            MessageStyle::Summary,
            MessageStyle::Highlights,
        ]
    }

    /// Parse a style name; unknown names are an error.
    pub fn parse(s: &str) -> Result<Self, ChannelError> {
        match s.trim().to_lowercase().as_str() {
            "bullets" | "bullet" => Ok(MessageStyle::Bullets),
            "summary" => Ok(MessageStyle::Summary),
            "highlights" | "highlight" => Ok(MessageStyle::Highlights),
            other => Err(ChannelError::UnknownStyle(other.to_string())),
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            MessageStyle::Bullets => "bullets",
            MessageStyle::Summary => "summary",
            MessageStyle::Highlights => "highlights",
        }
    }

    /// Most items the style shows.
    #[must_use]
    pub const fn max_items(&self) -> usize {
        match self {
            MessageStyle::Bullets => BULLETS_MAX_ITEMS,
            MessageStyle::Summary => SUMMARY_MAX_ITEMS,
            MessageStyle::Highlights => HIGHLIGHTS_MAX_ITEMS,
        }
    }
}

impl fmt::Display for MessageStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One article as shown in chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatItem {
    pub title: String,
    pub url: String,
    pub summary: String,
}

impl ChatItem {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            summary: summary.into(),
        }
    }
}

/// A digest ready to be laid out for a platform.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub title: String,
    pub items: Vec<ChatItem>,
    pub style: MessageStyle,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Message stamped with the current time.
    #[must_use]
    pub fn new(title: impl Into<String>, items: Vec<ChatItem>, style: MessageStyle) -> Self {
        Self {
            title: title.into(),
            items,
            style,
            timestamp: Utc::now(),
        }
    }

    /// Override the timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Items shown under the style's cap.
    pub fn visible_items(&self) -> &[ChatItem] {
        let n = self.items.len().min(self.style.max_items());
        &self.items[..n]
    }

    /// `"{n} items • {timestamp}"`.
    pub fn footer_text(&self) -> String {
        let n = self.visible_items().len();
        let noun = if n == 1 { "item" } else { "items" };
        format!(
            "{n} {noun} • {}",
            self.timestamp.format("%Y-%m-%d %H:%M UTC")
        )
    }
}

/// Cut to `max` characters and append `"..."` when anything was dropped.
pub fn truncate_chars(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max).collect();
    format!("{kept}...")
}
