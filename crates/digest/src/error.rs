//! Error types for the digest engine.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by digest rendering and delivery.
///
/// Composition itself never fails on bad upstream data; these cover the
/// adapter edges (files, templates, network collaborators).
#[derive(Debug, Error)]
pub enum DigestError {
    /// Reading or writing a file failed
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A handlebars template failed to compile or render
    #[error("Template error: {0}")]
    Template(String),

    /// The prompt-corner collaborator failed
    #[error("Prompt corner generation failed: {0}")]
    PromptCorner(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Building or sending an email failed
    #[error("Email error: {0}")]
    Email(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DigestError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<handlebars::RenderError> for DigestError {
    fn from(e: handlebars::RenderError) -> Self {
        Self::Template(e.to_string())
    }
}

impl From<handlebars::TemplateError> for DigestError {
    fn from(e: handlebars::TemplateError) -> Self {
        Self::Template(e.to_string())
    }
}

/// Result alias for the digest engine.
pub type Result<T> = std::result::Result<T, DigestError>;
