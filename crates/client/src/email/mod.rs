//! Email delivery collaborator.
//!
//! Messages are plain text. The SMTP transport is `lettre` over STARTTLS,
//! logging in with the sender address and its password from configuration.

use std::sync::Arc;
use std::time::Duration;

use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use medi_core::{AppConfig, Error};

/// A plain-text email to a single receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub subject: String,
    pub body: String,
    pub receiver: String,
}

/// Anything that can deliver an [`EmailMessage`].
#[async_trait::async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), Error>;
}

#[async_trait::async_trait]
impl<E: EmailSender + ?Sized> EmailSender for Arc<E> {
    async fn send(&self, message: &EmailMessage) -> Result<(), Error> {
        (**self).send(message).await
    }
}

/// SMTP relay settings.
#[derive(Clone)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    /// Sender address and SMTP login.
    pub sender: String,
    pub password: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("sender", &self.sender)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl From<&AppConfig> for SmtpConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            server: config.smtp_server.clone(),
            port: config.smtp_port,
            sender: config.email_sender.clone(),
            password: config.email_password.clone(),
            timeout: config.timeout(),
        }
    }
}

/// STARTTLS SMTP mailer.
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Build the MIME message for `email`, sent from the configured sender.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the receiver is blank or not an
    /// address, and `Error::EmailFailed` if no sender is configured.
    pub fn build_message(&self, email: &EmailMessage) -> Result<Message, Error> {
        if self.config.sender.trim().is_empty() {
            return Err(Error::EmailFailed("email sender is not configured".into()));
        }
        if email.receiver.trim().is_empty() {
            return Err(Error::InvalidInput("receiver cannot be empty".into()));
        }

        let from: Mailbox = self
            .config
            .sender
            .trim()
            .parse()
            .map_err(|e| Error::EmailFailed(format!("invalid sender address: {e}")))?;
        let to: Mailbox = email
            .receiver
            .trim()
            .parse()
            .map_err(|e| Error::InvalidInput(format!("invalid receiver address: {e}")))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .map_err(|e| Error::EmailFailed(e.to_string()))
    }
}

#[async_trait::async_trait]
impl EmailSender for SmtpMailer {
    async fn send(&self, email: &EmailMessage) -> Result<(), Error> {
        let message = self.build_message(email)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.server)
            .map_err(|e| Error::EmailFailed(format!("invalid SMTP relay {}: {e}", self.config.server)))?
            .port(self.config.port)
            .credentials(Credentials::new(self.config.sender.clone(), self.config.password.clone()))
            .timeout(Some(self.config.timeout))
            .build();

        transport.send(message).await.map_err(|e| {
            tracing::warn!(server = %self.config.server, "email delivery failed: {e}");
            Error::EmailFailed(e.to_string())
        })?;

        tracing::info!(receiver = %email.receiver, "email sent");
        Ok(())
    }
}
