mod preview;
mod zeptomail;

use crate::config::MailerConfig;
pub use preview::PreviewMailer;
use std::sync::Arc;
use tracing::{info, warn};
pub use zeptomail::ZeptoMailer;

#[derive(Debug, Clone, PartialEq)]
pub struct Recipient {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEmail {
    pub to: Vec<Recipient>,
    pub subject: String,
    pub html_body: String,
}

impl OutboundEmail {
    pub fn new(to: Recipient, subject: impl Into<String>, html_body: impl Into<String>) -> Self {
        Self {
            to: vec![to],
            subject: subject.into(),
            html_body: html_body.into(),
        }
    }

    pub fn recipient_list(&self) -> String {
        self.to
            .iter()
            .map(|r| r.email.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryReceipt {
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("Unable to reach the email provider: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Email provider rejected the email with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Delivers emails.
///
/// A returned `Ok` means the provider accepted the email, every other outcome
/// is an error and the email has to be treated as not delivered.
#[async_trait::async_trait]
pub trait IMailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, MailerError>;
}

pub fn create_mailer(config: &MailerConfig) -> Result<Arc<dyn IMailer>, MailerError> {
    match &config.zeptomail_token {
        Some(token) => {
            info!(
                "Emails will be delivered through ZeptoMail with a {:?} timeout",
                config.request_timeout
            );
            Ok(Arc::new(ZeptoMailer::new(config, token)?))
        }
        None => {
            warn!("No ZEPTOMAIL_TOKEN configured. Emails will only be logged.");
            Ok(Arc::new(PreviewMailer {}))
        }
    }
}
