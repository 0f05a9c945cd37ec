//! SMTP delivery of the email digest.

use lettre::message::{header::ContentType, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::error::{DigestError, Result};

/// Sends rendered digests over SMTP.
pub struct EmailSender {
    config: SmtpConfig,
}

impl EmailSender {
    /// Create a new email sender with the given configuration.
    #[must_use]
    pub const fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(SmtpConfig::from_env()?))
    }

    /// Build the multipart message: plain text first, HTML as the
    /// preferred alternative.
    pub fn build_message(&self, subject: &str, html_body: &str, text_body: &str) -> Result<Message> {
        let from: Mailbox = self
            .config
            .from_email
            .parse()
            .map_err(|e| DigestError::Email(format!("Invalid from address: {e}")))?;

        let to: Mailbox = self
            .config
            .to_email
            .parse()
            .map_err(|e| DigestError::Email(format!("Invalid to address: {e}")))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )
            .map_err(|e| DigestError::Email(format!("Failed to build message: {e}")))
    }

    /// Send an email with HTML and plain-text content.
    pub async fn send(&self, subject: &str, html_body: &str, text_body: &str) -> Result<()> {
        let email = self.build_message(subject, html_body, text_body)?;

        let creds = Credentials::new(
            self.config.smtp_username.clone(),
            self.config.smtp_password.clone(),
        );

        let mailer: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)
                .map_err(|e| DigestError::Email(format!("Failed to create SMTP transport: {e}")))?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build();

        mailer
            .send(email)
            .await
            .map_err(|e| DigestError::Email(format!("Failed to send via SMTP: {e}")))?;

        tracing::info!(
            to = %self.config.to_email,
            subject = subject,
            "Email digest sent"
        );

        Ok(())
    }
}
