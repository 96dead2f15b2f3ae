use lettre::{
    Message,
    message::{Mailbox, MultiPart, SinglePart},
};

use crate::error::NotifyError;

#[derive(Debug, Clone, PartialEq)]
pub struct AlertMessage {
    pub sender: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl AlertMessage {
    pub fn compose(
        sender: &str,
        recipient: &str,
        ticker: &str,
        threshold: f64,
        current_price: f64,
    ) -> Self {
        let subject = format!("Stock Alert: {ticker} Price Threshold Reached");
        let body = format!(
            "Hello,\n\n\
             The stock {ticker} has reached your threshold.\n\
             Current Price: ${current_price:.2}\n\
             Threshold: ${threshold:.2}\n\n\
             Regards,\nYour Stock Alert App"
        );

        Self {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            subject,
            body,
        }
    }

    /// Multipart message with a single text/plain part.
    pub fn to_mime(&self, sender_name: Option<&str>) -> Result<Message, NotifyError> {
        let from = Mailbox::new(
            sender_name.map(str::to_string),
            self.sender.parse()?,
        );
        let to: Mailbox = self.recipient.parse()?;

        let msg = Message::builder()
            .from(from)
            .to(to)
            .subject(&self.subject)
            .multipart(MultiPart::mixed().singlepart(SinglePart::plain(self.body.clone())))?;

        Ok(msg)
    }
}
