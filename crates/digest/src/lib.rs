//! Multi-format digest composition engine.
//!
//! Turns analyzed article entries into Markdown digests, a themed HTML
//! email, or a Slack/Discord chat message.
//!
//! - [`format`]: the static format profile table
//! - [`grouping`]: topic grouping with average confidence
//! - [`decorate`]: keyword rule tables for icons, actions and categories
//! - [`compose`]: the block pipeline producing a [`ComposedDigest`]
//! - [`output`]: Markdown and HTML email adapters
//! - [`chat`]: conversion into `notify` chat messages
//!
//! # Usage
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use digest_composer::{ArticleEntry, DigestComposer, DigestFormat, DigestInput, DigestRequest};
//!
//! # async fn run() {
//! let input = DigestInput::from_entries(vec![
//!     ArticleEntry::new("Rust 1.80 released", "https://blog.rust-lang.org", "New lints."),
//! ]);
//! let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let request = DigestRequest::new(input, DigestFormat::Brief, date);
//! let markdown = DigestComposer::new().compose(&request).await.to_markdown();
//! # }
//! ```

pub mod chat;
pub mod compose;
pub mod config;
pub mod decorate;
pub mod error;
pub mod format;
pub mod grouping;
pub mod mailer;
pub mod model;
pub mod output;
pub mod prompt_corner;
pub mod sink;
pub mod text;

pub use chat::chat_message;
pub use compose::{BlockKind, ComposedDigest, ContentBlock, DigestComposer, DigestRequest};
pub use config::{DigestConfig, SmtpConfig};
pub use error::{DigestError, Result};
pub use format::{DigestFormat, FormatProfile};
pub use grouping::{group_by_topic, TopicGroup};
pub use mailer::EmailSender;
pub use model::{ArticleEntry, BannerArtifact, ContentKind, DigestInput, DEFAULT_TOPIC};
pub use output::{EmailDocument, EmailRenderer, EmailTheme, ThemeName};
pub use prompt_corner::{AnthropicPromptCorner, PromptCornerGenerator};
pub use sink::{digest_filename, email_filename, FileSink};
