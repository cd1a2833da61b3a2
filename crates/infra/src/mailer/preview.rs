use super::{DeliveryReceipt, IMailer, MailerError, OutboundEmail};
use tracing::info;

/// Used when no email provider is configured. Logs the email and reports
/// it as delivered.
pub struct PreviewMailer {}

#[async_trait::async_trait]
impl IMailer for PreviewMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, MailerError> {
        let recipients = email.recipient_list();
        info!(
            to = recipients.as_str(),
            subject = email.subject.as_str(),
            "Email preview"
        );
        Ok(DeliveryReceipt {
            message: format!(
                "Email logged (no ZEPTOMAIL_TOKEN configured). Would send to {}",
                recipients
            ),
        })
    }
}
