//! Error types for chat delivery.

use thiserror::Error;

/// Errors that can occur when building or delivering chat messages.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// Channel is not configured (no webhook URL)
    #[error("Channel not configured: {0}")]
    NotConfigured(String),

    /// Platform name is not supported
    #[error("Unknown chat platform: {0}")]
    UnknownPlatform(String),

    /// Message style name is not supported
    #[error("Unknown message style: {0}")]
    UnknownStyle(String),

    /// Webhook URL does not look like one for the platform
    #[error("Invalid {platform} webhook URL: {url}")]
    InvalidWebhookUrl { platform: &'static str, url: String },

    /// The webhook answered with a non-success status
    #[error("{platform} returned {status}: {body}")]
    Delivery {
        platform: &'static str,
        status: u16,
        body: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ChannelError {
    /// Whether the error was raised before any network call.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::NotConfigured(_)
                | Self::UnknownPlatform(_)
                | Self::UnknownStyle(_)
                | Self::InvalidWebhookUrl { .. }
        )
    }
}
