//! Slack webhook channel.

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

/// Bot icon.
pub const SLACK_ICON_EMOJI: &str = ":newspaper:";

const ATTACHMENT_COLOR: &str = "#2563eb";

/// Slack webhook channel.
pub struct SlackChannel {
    webhook_url: String,
    client: reqwest::Client,
}

impl SlackChannel {
    /// Create a Slack channel for a validated webhook URL.
    pub fn new(webhook_url: impl Into<String>) -> Result<Self, ChannelError> {
        let webhook_url = webhook_url.into().trim().to_string();
        validate_webhook_url(Platform::Slack, &webhook_url)?;
        Ok(Self {
            webhook_url,
            client: webhook_client()?,
        })
    }

    /// Lay out a message as a Slack payload.
    #[must_use]
    pub fn format_payload(message: &ChatMessage) -> SlackPayload {
        let items = message.visible_items();
        let mut payload = SlackPayload {
            username: BOT_USERNAME.to_string(),
            icon_emoji: SLACK_ICON_EMOJI.to_string(),
            text: message.title.clone(),
            blocks: Vec::new(),
            attachments: Vec::new(),
        };

        match message.style {
            MessageStyle::Bullets => {
                payload.blocks.push(SlackBlock::header(&message.title));
                for item in items {
                    let mut text = format!("• *<{}|{}>*", item.url, item.title);
                    if !item.summary.trim().is_empty() {
                        text.push('\n');
                        text.push_str(&truncate_chars(&item.summary, BULLET_SUMMARY_CHARS));
                    }
                    payload.blocks.push(SlackBlock::section(text));
                }
                payload.blocks.push(SlackBlock::context(message.footer_text()));
            }
            MessageStyle::Highlights => {
                payload.blocks.push(SlackBlock::header(&message.title));
                let lines = items
                    .iter()
                    .map(|item| format!("• <{}|{}>", item.url, item.title))
                    .collect::<Vec<_>>()
                    .join("\n");
                if !lines.is_empty() {
                    payload.blocks.push(SlackBlock::section(lines));
                }
                payload.blocks.push(SlackBlock::context(message.footer_text()));
            }
            MessageStyle::Summary => {
                let fields = items
                    .iter()
                    .map(|item| SlackField {
                        title: item.title.clone(),
                        value: format!(
                            "{}\n<{}|Read more>",
                            truncate_chars(&item.summary, FIELD_SUMMARY_CHARS),
                            item.url
                        ),
                        short: false,
                    })
                    .collect();

                payload.attachments.push(SlackAttachment {
                    fallback: message.title.clone(),
                    color: ATTACHMENT_COLOR.to_string(),
                    title: message.title.clone(),
                    fields,
                    footer: Some(message.footer_text()),
                    ts: Some(message.timestamp.timestamp()),
                });
            }
        }

        payload
    }
}

#[async_trait]
impl NotifyChannel for SlackChannel {
    fn name(&self) -> &'static str {
        "slack"
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
            channel = "slack",
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
        if status == StatusCode::OK {
            debug!(channel = "slack", "Digest delivered");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!(
            channel = "slack",
            status = %status,
            body = %body,
            "Slack webhook request failed"
        );

        Err(ChannelError::Delivery {
            platform: "slack",
            status: status.as_u16(),
            body,
        })
    }
}

// =============================================================================
// Slack API types
// =============================================================================

#[derive(Debug, Serialize)]
pub struct SlackPayload {
    pub username: String,
    pub icon_emoji: String,
    /// Notification fallback text.
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<SlackBlock>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<SlackAttachment>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlackBlock {
    Header { text: SlackText },
    Section { text: SlackText },
    Context { elements: Vec<SlackText> },
}

impl SlackBlock {
    fn header(text: &str) -> Self {
        // Slack caps header text at 150 characters.
        Self::Header {
            text: SlackText::plain(truncate_chars(text, 147)),
        }
    }

    fn section(text: String) -> Self {
        Self::Section {
            text: SlackText::mrkdwn(text),
        }
    }

    fn context(text: String) -> Self {
        Self::Context {
            elements: vec![SlackText::mrkdwn(text)],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SlackText {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

impl SlackText {
    fn plain(text: String) -> Self {
        Self {
            kind: "plain_text",
            text,
        }
    }

    fn mrkdwn(text: String) -> Self {
        Self {
            kind: "mrkdwn",
            text,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SlackAttachment {
    pub fallback: String,
    pub color: String,
    pub title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<SlackField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SlackField {
    pub title: String,
    pub value: String,
    pub short: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ChatItem;
    use chrono::TimeZone;
    use chrono::Utc;

    fn message(n: usize, style: MessageStyle) -> ChatMessage {
        let items = (0..n)
            .map(|i| ChatItem::new(format!("Item {i}"), format!("https://e/{i}"), "x".repeat(200)))
            .collect();
        ChatMessage::new("Tech Digest", items, style)
            .with_timestamp(Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap())
    }

    #[test]
    fn test_bullets_layout() {
        let payload = SlackChannel::format_payload(&message(12, MessageStyle::Bullets));
        // header + 10 items + footer
        assert_eq!(payload.blocks.len(), 12);
        assert!(payload.attachments.is_empty());

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["blocks"][0]["type"], "header");
        assert_eq!(json["blocks"][0]["text"]["type"], "plain_text");
        assert_eq!(json["blocks"][1]["type"], "section");

        let first = json["blocks"][1]["text"]["text"].as_str().unwrap();
        assert_eq!(first, format!("• *<https://e/0|Item 0>*\n{}...", "x".repeat(100)));

        assert_eq!(
            json["blocks"][11]["elements"][0]["text"],
            "10 items • 2024-06-01 09:30 UTC"
        );
        assert_eq!(json["username"], BOT_USERNAME);
        assert_eq!(json["icon_emoji"], SLACK_ICON_EMOJI);
    }

    #[test]
    fn test_summary_uses_attachment_fields() {
        let payload = SlackChannel::format_payload(&message(8, MessageStyle::Summary));
        assert!(payload.blocks.is_empty());
        assert_eq!(payload.attachments.len(), 1);

        let fields = &payload.attachments[0].fields;
        assert_eq!(fields.len(), 5);
        assert!(fields[0]
            .value
            .starts_with(&format!("{}...\n", "x".repeat(150))));
        assert_eq!(payload.attachments[0].ts, Some(1_717_234_200));
    }

    #[test]
    fn test_highlights_are_titles_only() {
        let payload = SlackChannel::format_payload(&message(7, MessageStyle::Highlights));
        let json = serde_json::to_value(&payload).unwrap();
        let list = json["blocks"][1]["text"]["text"].as_str().unwrap();
        assert_eq!(list.lines().count(), 5);
        assert!(!list.contains("xxx"));
    }
}
