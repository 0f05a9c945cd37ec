//! Chat digests for Slack and Discord.
//!
//! This crate lays out a short list of articles as a Slack or Discord
//! webhook payload in one of three compact styles and posts it.
//!
//! # Usage
//!
//! ```no_run
//! use notify::{ChatItem, ChatMessage, MessageStyle, Notifier};
//!
//! # async fn run() {
//! let notifier = Notifier::from_env();
//! let message = ChatMessage::new(
//!     "Tech Digest",
//!     vec![ChatItem::new("Rust 1.80", "https://blog.rust-lang.org", "New lints")],
//!     MessageStyle::Bullets,
//! );
//! for (channel, result) in notifier.send_all(&message).await {
//!     println!("{channel}: {result:?}");
//! }
//! # }
//! ```
//!
//! # Configuration
//!
//! - `SLACK_WEBHOOK_URL`: Slack incoming webhook (enables Slack)
//! - `DISCORD_WEBHOOK_URL`: Discord webhook (enables Discord)
//!
//! # Architecture
//!
//! - [`NotifyChannel`] trait defines the interface for chat channels
//! - [`SlackChannel`] and [`DiscordChannel`] implement webhook delivery
//! - [`Notifier`] sends a message to every configured channel

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod channels;
pub mod error;
pub mod message;

pub use channels::discord::DiscordChannel;
pub use channels::slack::SlackChannel;
pub use channels::{channel_for, validate_webhook_url, NotifyChannel, WEBHOOK_TIMEOUT};
pub use error::ChannelError;
pub use message::{
    truncate_chars, ChatItem, ChatMessage, MessageStyle, Platform, BOT_USERNAME,
    BULLETS_MAX_ITEMS, BULLET_SUMMARY_CHARS, FIELD_SUMMARY_CHARS, HIGHLIGHTS_MAX_ITEMS,
    SUMMARY_MAX_ITEMS,
};

use std::sync::Arc;
use tracing::{debug, info, warn};

/// Sends chat digests to every configured channel.
pub struct Notifier {
    channels: Vec<Arc<dyn NotifyChannel>>,
}

impl Notifier {
    /// Create a notifier from environment variables.
    ///
    /// Platforms whose webhook variable is unset are skipped; a variable set
    /// to a malformed URL is logged and skipped.
    #[must_use]
    pub fn from_env() -> Self {
        let mut channels: Vec<Arc<dyn NotifyChannel>> = vec![];

        for platform in Platform::all() {
            if std::env::var(platform.webhook_env_var()).is_err() {
                debug!(platform = %platform, "Webhook not set, skipping");
                continue;
            }
            match channel_for(*platform, None) {
                Ok(channel) => {
                    info!(platform = %platform, "Chat channel enabled");
                    channels.push(channel);
                }
                Err(e) => {
                    warn!(platform = %platform, error = %e, "Ignoring misconfigured channel");
                }
            }
        }

        if channels.is_empty() {
            warn!("No chat channels configured");
        }

        Self { channels }
    }

    /// Create a notifier with specific channels.
    #[must_use]
    pub fn with_channels(channels: Vec<Arc<dyn NotifyChannel>>) -> Self {
        Self { channels }
    }

    /// Check if any channels are enabled.
    #[must_use]
    pub fn has_channels(&self) -> bool {
        self.channels.iter().any(|c| c.enabled())
    }

    /// Get the number of channels.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Send a message to every enabled channel and collect the results.
    ///
    /// Channels are posted to one after another; a failure on one does not
    /// stop the others.
    pub async fn send_all(&self, message: &ChatMessage) -> Vec<(String, Result<(), ChannelError>)> {
        let mut results = vec![];

        for channel in &self.channels {
            let channel_name = channel.name();
            if !channel.enabled() {
                debug!(channel = channel_name, "Channel disabled, skipping");
                continue;
            }

            let result = channel.send(message).await;
            match &result {
                Ok(()) => info!(channel = channel_name, "Chat digest sent"),
                Err(e) => warn!(channel = channel_name, error = %e, "Chat digest failed"),
            }
            results.push((channel_name.to_string(), result));
        }

        results
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::from_env()
    }
}
