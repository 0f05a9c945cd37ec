//! Discord webhook channel.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, warn};

use super::{validate_webhook_url, webhook_client, NotifyChannel};
use crate::error::ChannelError;
use crate::message::{
    truncate_chars, ChatMessage, MessageStyle, Platform, BOT_USERNAME, BULLET_SUMMARY_CHARS,
    FIELD_SUMMARY_CHARS,
};

/// Bot avatar.
pub const DISCORD_AVATAR_URL: &str =
    "https://cdn.jsdelivr.net/gh/twitter/twemoji@14.0.2/assets/72x72/1f4f0.png";

/// Embed accent color.
const EMBED_COLOR: u32 = 0x0025_63eb;

/// Discord caps embed titles and field names at 256 characters.
const TITLE_LIMIT: usize = 253;

/// Discord webhook channel.
pub struct DiscordChannel {
    webhook_url: String,
    client: reqwest::Client,
}

impl DiscordChannel {
    /// Create a Discord channel for a validated webhook URL.
    pub fn new(webhook_url: impl Into<String>) -> Result<Self, ChannelError> {
        let webhook_url = webhook_url.into().trim().to_string();
        validate_webhook_url(Platform::Discord, &webhook_url)?;
        Ok(Self {
            webhook_url,
            client: webhook_client()?,
        })
    }

    /// Lay out a message as a Discord payload.
    #[must_use]
    pub fn format_payload(message: &ChatMessage) -> DiscordPayload {
        let items = message.visible_items();
        let mut embed = DiscordEmbed {
            title: truncate_chars(&message.title, TITLE_LIMIT),
            description: None,
            color: EMBED_COLOR,
            fields: Vec::new(),
            footer: Some(DiscordFooter {
                text: message.footer_text(),
            }),
            timestamp: Some(message.timestamp.to_rfc3339()),
        };

        match message.style {
            MessageStyle::Bullets => {
                let lines = items
                    .iter()
                    .map(|item| {
                        let mut line = format!("• **[{}]({})**", item.title, item.url);
                        if !item.summary.trim().is_empty() {
                            line.push('\n');
                            line.push_str(&truncate_chars(&item.summary, BULLET_SUMMARY_CHARS));
                        }
                        line
                    })
                    .collect::<Vec<_>>()
                    .join("\n\n");
                embed.description = Some(lines).filter(|d| !d.is_empty());
            }
            MessageStyle::Summary => {
                embed.fields = items
                    .iter()
                    .map(|item| DiscordField {
                        name: truncate_chars(&item.title, TITLE_LIMIT),
                        value: format!(
                            "{}\n[Read more]({})",
                            truncate_chars(&item.summary, FIELD_SUMMARY_CHARS),
                            item.url
                        ),
                        inline: false,
                    })
                    .collect();
            }
            MessageStyle::Highlights => {
                let lines = items
                    .iter()
                    .map(|item| format!("• [{}]({})", item.title, item.url))
                    .collect::<Vec<_>>()
                    .join("\n");
                embed.description = Some(lines).filter(|d| !d.is_empty());
            }
        }

        DiscordPayload {
            username: BOT_USERNAME.to_string(),
            avatar_url: DISCORD_AVATAR_URL.to_string(),
            embeds: vec![embed],
        }
    }
}

#[async_trait]
impl NotifyChannel for DiscordChannel {
    fn name(&self) -> &'static str {
        "discord"
    }

    fn enabled(&self) -> bool {
        !self.webhook_url.is_empty()
    }

    fn render(&self, message: &ChatMessage) -> Result<serde_json::Value, ChannelError> {
        Ok(serde_json::to_value(Self::format_payload(message))?)
    }

    async fn send(&self, message: &ChatMessage) -> Result<(), ChannelError> {
        let payload = Self::format_payload(message);

        debug!(
            channel = "discord",
            style = %message.style,
            items = message.visible_items().len(),
            "Sending digest"
        );

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK || status == StatusCode::NO_CONTENT {
            debug!(channel = "discord", "Digest delivered");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!(
            channel = "discord",
            status = %status,
            body = %body,
            "Discord webhook request failed"
        );

        Err(ChannelError::Delivery {
            platform: "discord",
            status: status.as_u16(),
            body,
        })
    }
}

// =============================================================================
// Discord API types
// =============================================================================

#[derive(Debug, Serialize)]
pub struct DiscordPayload {
    pub username: String,
    pub avatar_url: String,
    pub embeds: Vec<DiscordEmbed>,
}

#[derive(Debug, Serialize)]
pub struct DiscordEmbed {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<DiscordField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<DiscordFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DiscordField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Serialize)]
pub struct DiscordFooter {
    pub text: String,
}
