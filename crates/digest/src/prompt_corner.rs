//! Prompt corner generation.
//!
//! The composer treats the generator as an opaque, best-effort text source.
//! [`AnthropicPromptCorner`] implements it against the Anthropic Messages API.

use std::time::Duration;

use async_trait::async_trait;
use handlebars::Handlebars;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{DigestError, Result};

/// Anthropic API endpoint
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Anthropic API version
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default model
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Per-request client timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const MAX_TOKENS: u32 = 600;

const SYSTEM_PROMPT: &str = "You write the closing \"Prompt Corner\" of a technology digest: \
a few short, reflective prompts that help readers connect the stories to their own work. \
Reply in Markdown only, without a heading.";

const USER_TEMPLATE: &str = "Here is today's digest summary:\n\n{{summary}}\n\n\
Write {{count}} numbered prompts. Each prompt is one or two sentences and points back \
to something specific in the summary.";

/// Source of prompt-corner text.
#[async_trait]
pub trait PromptCornerGenerator: Send + Sync {
    /// Generator name used in logs.
    fn name(&self) -> &'static str;

    /// Produce prompt-corner Markdown for a digest summary.
    async fn generate(&self, summary: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
}

/// Prompt corner backed by the Anthropic Messages API.
pub struct AnthropicPromptCorner {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    prompt_count: usize,
}

impl AnthropicPromptCorner {
    /// Create a generator with the default model and endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_key, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a generator with a custom client timeout.
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: ANTHROPIC_API_URL.to_string(),
            prompt_count: 3,
        })
    }

    /// Set the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Render the user message for a summary.
    pub fn render_prompt(&self, summary: &str) -> Result<String> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);
        handlebars.register_template_string("prompt_corner", USER_TEMPLATE)?;

        let rendered = handlebars.render(
            "prompt_corner",
            &json!({ "summary": summary.trim(), "count": self.prompt_count }),
        )?;
        Ok(rendered)
    }
}

#[async_trait]
impl PromptCornerGenerator for AnthropicPromptCorner {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn generate(&self, summary: &str) -> Result<String> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system: SYSTEM_PROMPT,
            messages: vec![Message {
                role: "user",
                content: self.render_prompt(summary)?,
            }],
        };

        tracing::debug!(model = %self.model, "Requesting prompt corner");

        let response = self
            .client
            .post(&self.base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            if let Ok(err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                return Err(DigestError::PromptCorner(format!(
                    "{} - {}",
                    err.error.error_type, err.error.message
                )));
            }
            return Err(DigestError::PromptCorner(format!("status {status}: {body}")));
        }

        let parsed: MessagesResponse = serde_json::from_str(&body)?;
        let text = parsed
            .content
            .iter()
            .filter(|c| c.content_type == "text")
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(DigestError::PromptCorner("empty response".to_string()));
        }
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn generator(server: &MockServer) -> AnthropicPromptCorner {
        AnthropicPromptCorner::new("test-key")
            .unwrap()
            .with_base_url(format!("{}/v1/messages", server.uri()))
    }

    #[test]
    fn test_render_prompt_does_not_escape() {
        let generator = AnthropicPromptCorner::new("k").unwrap();
        let prompt = generator.render_prompt("  Rust & Go <3  ").unwrap();
        assert!(prompt.contains("Rust & Go <3\n"));
        assert!(prompt.contains("Write 3 numbered prompts"));
    }

    #[tokio::test]
    async fn test_generate_joins_text_blocks() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-key"))
            .and(header("anthropic-version", ANTHROPIC_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [
                    { "type": "text", "text": "1. What would you " },
                    { "type": "text", "text": "ship first?" }
                ]
            })))
            .mount(&server)
            .await;

        let text = generator(&server).generate("Summary").await.unwrap();
        assert_eq!(text, "1. What would you ship first?");
    }

    #[tokio::test]
    async fn test_api_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": { "type": "rate_limit_error", "message": "slow down" }
            })))
            .mount(&server)
            .await;

        let err = generator(&server).generate("Summary").await.unwrap_err();
        assert!(matches!(err, DigestError::PromptCorner(ref m) if m.contains("rate_limit_error")));
    }
}
