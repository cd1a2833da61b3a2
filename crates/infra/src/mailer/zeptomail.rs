use super::{DeliveryReceipt, IMailer, MailerError, OutboundEmail, Recipient};
use crate::config::MailerConfig;
use reqwest::Client;
use serde::Serialize;
use tracing::error;

const TOKEN_PREFIX: &str = "Zoho-enczapikey";

#[derive(Debug, Serialize, PartialEq)]
struct EmailAddress {
    address: String,
    name: String,
}

#[derive(Debug, Serialize, PartialEq)]
struct ZeptoRecipient {
    email_address: EmailAddress,
}

#[derive(Debug, Serialize, PartialEq)]
struct ZeptoSendRequest {
    from: EmailAddress,
    to: Vec<ZeptoRecipient>,
    subject: String,
    htmlbody: String,
}

impl From<&Recipient> for ZeptoRecipient {
    fn from(r: &Recipient) -> Self {
        let name = if r.name.trim().is_empty() {
            r.email.clone()
        } else {
            r.name.clone()
        };
        Self {
            email_address: EmailAddress {
                address: r.email.clone(),
                name,
            },
        }
    }
}

pub struct ZeptoMailer {
    client: Client,
    api_url: String,
    authorization: String,
    from: (String, String),
}

impl ZeptoMailer {
    pub fn new(config: &MailerConfig, token: &str) -> Result<Self, MailerError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            authorization: authorization_header(token),
            from: (config.from_email.clone(), config.from_name.clone()),
        })
    }

    fn request_body(&self, email: &OutboundEmail) -> ZeptoSendRequest {
        ZeptoSendRequest {
            from: EmailAddress {
                address: self.from.0.clone(),
                name: self.from.1.clone(),
            },
            to: email.to.iter().map(ZeptoRecipient::from).collect(),
            subject: email.subject.clone(),
            htmlbody: email.html_body.clone(),
        }
    }
}

/// Tokens are accepted both with and without the scheme prefix
fn authorization_header(token: &str) -> String {
    let token = token.trim();
    if token.starts_with(TOKEN_PREFIX) {
        token.to_string()
    } else {
        format!("{} {}", TOKEN_PREFIX, token)
    }
}

#[async_trait::async_trait]
impl IMailer for ZeptoMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, MailerError> {
        let res = self
            .client
            .post(&self.api_url)
            .header("Accept", "application/json")
            .header("Authorization", &self.authorization)
            .json(&self.request_body(email))
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            error!(
                "ZeptoMail rejected email to {} with status {}: {}",
                email.recipient_list(),
                status,
                body
            );
            return Err(MailerError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(DeliveryReceipt {
            message: format!("Email sent to {}", email.recipient_list()),
        })
    }
}
