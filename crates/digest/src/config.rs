//! Environment configuration for the digest engine.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{DigestError, Result};
use crate::format::DigestFormat;
use crate::output::ThemeName;
use crate::prompt_corner::DEFAULT_MODEL;

/// Default directory for rendered digests.
pub const DEFAULT_OUTPUT_DIR: &str = "./digests";

/// Default prompt-corner timeout in seconds.
pub const DEFAULT_PROMPT_TIMEOUT_SECS: u64 = 30;

/// Default SMTP host.
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Default SMTP port (STARTTLS).
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Rendering configuration.
#[derive(Debug, Clone)]
pub struct DigestConfig {
    /// Where rendered files are written.
    pub output_dir: PathBuf,
    pub format: DigestFormat,
    pub email_theme: ThemeName,
    /// Order topic groups by confidence instead of first appearance.
    pub sort_groups_by_confidence: bool,
    pub prompt_timeout: Duration,
    /// Overrides the profile title.
    pub custom_title: Option<String>,
    /// Enables the prompt-corner generator when set.
    pub anthropic_api_key: Option<String>,
    pub prompt_model: String,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            format: DigestFormat::default(),
            email_theme: ThemeName::default(),
            sort_groups_by_confidence: true,
            prompt_timeout: Duration::from_secs(DEFAULT_PROMPT_TIMEOUT_SECS),
            custom_title: None,
            anthropic_api_key: None,
            prompt_model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl DigestConfig {
    /// Create configuration from environment variables.
    ///
    /// # Optional Environment Variables
    /// - `DIGEST_OUTPUT_DIR`: Output directory (default: ./digests)
    /// - `DIGEST_FORMAT`: Format profile name (default: standard)
    /// - `DIGEST_EMAIL_THEME`: Email theme name (default: default)
    /// - `DIGEST_SORT_GROUPS`: Sort topic groups by confidence (default: true)
    /// - `DIGEST_PROMPT_TIMEOUT_SECS`: Prompt corner timeout (default: 30)
    /// - `DIGEST_TITLE`: Custom digest title
    /// - `ANTHROPIC_API_KEY`: Enables the prompt corner
    /// - `DIGEST_PROMPT_MODEL`: Prompt corner model
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let sort_groups_by_confidence = match get("DIGEST_SORT_GROUPS") {
            Some(v) => parse_bool(&v).ok_or_else(|| {
                DigestError::Config(format!("DIGEST_SORT_GROUPS must be true or false, got '{v}'"))
            })?,
            None => defaults.sort_groups_by_confidence,
        };

        let prompt_timeout = match get("DIGEST_PROMPT_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(v.parse().map_err(|_| {
                DigestError::Config(format!(
                    "DIGEST_PROMPT_TIMEOUT_SECS must be a whole number of seconds, got '{v}'"
                ))
            })?),
            None => defaults.prompt_timeout,
        };

        Ok(Self {
            output_dir: get("DIGEST_OUTPUT_DIR").map_or(defaults.output_dir, PathBuf::from),
            format: get("DIGEST_FORMAT").map_or(defaults.format, |v| DigestFormat::parse(&v)),
            email_theme: get("DIGEST_EMAIL_THEME")
                .map_or(defaults.email_theme, |v| ThemeName::parse(&v)),
            sort_groups_by_confidence,
            prompt_timeout,
            custom_title: get("DIGEST_TITLE"),
            anthropic_api_key: get("ANTHROPIC_API_KEY"),
            prompt_model: get("DIGEST_PROMPT_MODEL").unwrap_or(defaults.prompt_model),
        })
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// SMTP settings for sending the email digest.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub to_email: String,
    /// Sender address (defaults to the username).
    pub from_email: String,
}

impl SmtpConfig {
    /// Create configuration from environment variables.
    ///
    /// # Required Environment Variables
    /// - `SMTP_USERNAME`: SMTP login
    /// - `SMTP_PASSWORD`: SMTP password or app password
    /// - `DIGEST_TO_EMAIL`: Recipient
    ///
    /// # Optional Environment Variables
    /// - `SMTP_HOST`: Server (default: smtp.gmail.com)
    /// - `SMTP_PORT`: Port (default: 587)
    /// - `DIGEST_FROM_EMAIL`: Sender (default: `SMTP_USERNAME`)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| DigestError::Config(format!("{key} environment variable not set")))
        };

        let smtp_username = require("SMTP_USERNAME")?;
        let smtp_password = require("SMTP_PASSWORD")?;
        let to_email = require("DIGEST_TO_EMAIL")?;

        let smtp_port = match get("SMTP_PORT") {
            Some(v) => v
                .parse()
                .map_err(|_| DigestError::Config(format!("SMTP_PORT is not a valid port: '{v}'")))?,
            None => DEFAULT_SMTP_PORT,
        };

        Ok(Self {
            smtp_host: get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            smtp_port,
            from_email: get("DIGEST_FROM_EMAIL").unwrap_or_else(|| smtp_username.clone()),
            smtp_username,
            smtp_password,
            to_email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DigestConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("./digests"));
        assert_eq!(config.format, DigestFormat::Standard);
        assert_eq!(config.email_theme, ThemeName::Default);
        assert!(config.sort_groups_by_confidence);
        assert_eq!(config.prompt_timeout, Duration::from_secs(30));
        assert!(config.anthropic_api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = DigestConfig::from_lookup(lookup(&[
            ("DIGEST_FORMAT", "scannable"),
            ("DIGEST_EMAIL_THEME", "minimal"),
            ("DIGEST_SORT_GROUPS", "false"),
            ("DIGEST_PROMPT_TIMEOUT_SECS", "5"),
            ("DIGEST_TITLE", "Friday Reads"),
            ("ANTHROPIC_API_KEY", "  "),
        ]))
        .unwrap();
        assert_eq!(config.format, DigestFormat::Scannable);
        assert_eq!(config.email_theme, ThemeName::Minimal);
        assert!(!config.sort_groups_by_confidence);
        assert_eq!(config.prompt_timeout, Duration::from_secs(5));
        assert_eq!(config.custom_title.as_deref(), Some("Friday Reads"));
        assert!(config.anthropic_api_key.is_none());
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let err = DigestConfig::from_lookup(lookup(&[("DIGEST_SORT_GROUPS", "maybe")])).unwrap_err();
        assert!(matches!(err, DigestError::Config(_)));

        let err =
            DigestConfig::from_lookup(lookup(&[("DIGEST_PROMPT_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, DigestError::Config(_)));
    }

    #[test]
    fn test_smtp_requires_credentials() {
        let err = SmtpConfig::from_lookup(lookup(&[("SMTP_USERNAME", "me@example.com")])).unwrap_err();
        assert!(err.to_string().contains("SMTP_PASSWORD"));

        let config = SmtpConfig::from_lookup(lookup(&[
            ("SMTP_USERNAME", "me@example.com"),
            ("SMTP_PASSWORD", "secret"),
            ("DIGEST_TO_EMAIL", "team@example.com"),
        ]))
        .unwrap();
        assert_eq!(config.smtp_host, DEFAULT_SMTP_HOST);
        assert_eq!(config.smtp_port, 587);
        assert_eq!(config.from_email, "me@example.com");
    }
}
