//! SMTP notification channel.

use lettre::{
    message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use serde::Deserialize;

use crate::{
    models::notification::AlertMessage,
    notification::{error::DispatchError, traits::Notifier},
};

/// Default submission port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

fn default_port() -> u16 {
    DEFAULT_SMTP_PORT
}

/// SMTP channel settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SmtpConfig {
    /// SMTP server hostname.
    pub host: String,

    /// Submission port; 587 unless overridden.
    #[serde(default = "default_port")]
    pub port: u16,

    /// RFC 5322 sender address.
    pub from: String,

    /// Optional username for authentication.
    #[serde(default)]
    pub username: Option<String>,

    /// Optional password for authentication.
    #[serde(default)]
    pub password: Option<String>,
}

/// Sends alert messages through an SMTP relay over STARTTLS.
pub struct SmtpNotifier {
    config: SmtpConfig,
}

impl SmtpNotifier {
    /// Creates a notifier for the given SMTP settings.
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Assembles the MIME message. Attachment paths that no longer exist are
    /// skipped with a warning; report files can rotate away between the
    /// trigger and the send.
    fn build_message(&self, message: &AlertMessage) -> Result<Message, DispatchError> {
        let mut builder =
            Message::builder().from(self.config.from.parse::<Mailbox>()?).subject(&message.subject);
        for recipient in &message.recipients {
            builder = builder.to(recipient.parse::<Mailbox>()?);
        }

        if message.attachments.is_empty() {
            return builder
                .header(ContentType::TEXT_PLAIN)
                .body(message.body.clone())
                .map_err(|e| DispatchError::Build(e.to_string()));
        }

        let mut parts = MultiPart::mixed().singlepart(SinglePart::plain(message.body.clone()));
        for path in &message.attachments {
            if !path.exists() {
                tracing::warn!(path = %path.display(), "Attachment not found, skipping");
                continue;
            }
            let filename = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("attachment")
                .to_string();
            let content = std::fs::read(path)?;
            let content_type = ContentType::parse("application/octet-stream")
                .map_err(|e| DispatchError::Build(e.to_string()))?;
            parts = parts.singlepart(Attachment::new(filename).body(content, content_type));
        }
        builder.multipart(parts).map_err(|e| DispatchError::Build(e.to_string()))
    }
}

#[async_trait::async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, message: &AlertMessage) -> Result<(), DispatchError> {
        let email = self.build_message(message)?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?
                .port(self.config.port);
        if let (Some(user), Some(pass)) = (&self.config.username, &self.config.password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(
            subject = %message.subject,
            recipients = message.recipients.len(),
            "Alert email sent via SMTP"
        );
        Ok(())
    }
}
