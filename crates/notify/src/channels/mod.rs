//! Chat channel implementations.

pub mod discord;
pub mod slack;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::ChannelError;
use crate::message::{ChatMessage, Platform};

pub use discord::DiscordChannel;
pub use slack::SlackChannel;

/// Client-level timeout for webhook requests.
pub const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for chat channels (Slack, Discord).
#[async_trait]
pub trait NotifyChannel: Send + Sync {
    /// Get the name of this channel.
    fn name(&self) -> &'static str;

    /// Check if this channel is enabled/configured.
    fn enabled(&self) -> bool;

    /// Render the JSON payload without sending it.
    fn render(&self, message: &ChatMessage) -> Result<serde_json::Value, ChannelError>;

    /// Post a message to this channel's webhook. No retries.
    async fn send(&self, message: &ChatMessage) -> Result<(), ChannelError>;
}

/// Build the HTTP client shared by webhook channels.
pub(crate) fn webhook_client() -> Result<reqwest::Client, ChannelError> {
    Ok(reqwest::Client::builder().timeout(WEBHOOK_TIMEOUT).build()?)
}

/// Check that a webhook URL is present and looks like one for `platform`.
pub fn validate_webhook_url(platform: Platform, url: &str) -> Result<(), ChannelError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ChannelError::NotConfigured(
            platform.webhook_env_var().to_string(),
        ));
    }

    let scheme_ok = url.starts_with("https://") || url.starts_with("http://");
    let host_ok = match platform {
        Platform::Slack => url.contains("hooks.slack.com"),
        Platform::Discord => {
            url.contains("discord.com/api/webhooks") || url.contains("discordapp.com/api/webhooks")
        }
    };

    if scheme_ok && host_ok {
        Ok(())
    } else {
        Err(ChannelError::InvalidWebhookUrl {
            platform: platform.as_str(),
            url: url.to_string(),
        })
    }
}

/// Build a channel for a platform from an explicit URL or its environment
/// variable.
pub fn channel_for(
    platform: Platform,
    webhook_url: Option<&str>,
) -> Result<Arc<dyn NotifyChannel>, ChannelError> {
    let url = match webhook_url {
        Some(url) => url.to_string(),
        None => std::env::var(platform.webhook_env_var()).unwrap_or_default(),
    };

    let channel: Arc<dyn NotifyChannel> = match platform {
        Platform::Slack => Arc::new(SlackChannel::new(url)?),
        Platform::Discord => Arc::new(DiscordChannel::new(url)?),
    };
    Ok(channel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_url_is_not_configured() {
        let err = validate_webhook_url(Platform::Slack, "  ").unwrap_err();
        assert!(matches!(err, ChannelError::NotConfigured(ref v) if v == "SLACK_WEBHOOK_URL"));
    }

    #[test]
    fn test_host_check() {
        assert!(validate_webhook_url(
            Platform::Slack,
            "https://hooks.slack.com/services/T000/B000/XXXX"
        )
        .is_ok());
        assert!(validate_webhook_url(
            Platform::Discord,
            "https://discord.com/api/webhooks/123/abc"
        )
        .is_ok());
        assert!(validate_webhook_url(
            Platform::Discord,
            "https://discordapp.com/api/webhooks/123/abc"
        )
        .is_ok());

        let err = validate_webhook_url(Platform::Discord, "https://hooks.slack.com/services/x")
            .unwrap_err();
        assert!(matches!(
            err,
            ChannelError::InvalidWebhookUrl { platform: "discord", .. }
        ));
        assert!(validate_webhook_url(Platform::Slack, "hooks.slack.com/services/x").is_err());
    }

    #[test]
    fn test_channel_for_explicit_url() {
        let channel = channel_for(
            Platform::Discord,
            Some("https://discord.com/api/webhooks/1/t"),
        )
        .unwrap();
        assert_eq!(channel.name(), "discord");
        assert!(channel.enabled());

        let err = channel_for(Platform::Slack, Some("")).err().unwrap();
        assert!(err.is_configuration());
    }
}
