//! Mailer module

use async_trait::async_trait;

mod errors;
mod message;

pub use errors::MailerError;
pub use message::{
    Alternative, Attachment, EmailMessage, ProviderOverride, Recipient, HTML_MIMETYPE,
};

/// Outbound mail interface
#[async_trait]
pub trait Mailer: Clone + Send + Sync + 'static {
    /// Send a single message.
    ///
    /// # Arguments
    /// * `message` - The [`EmailMessage`] to send.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] containing the number of accepted recipients,
    /// or an [`Err`] containing a [`MailerError`] if the message could not be sent.
    async fn send_message(&self, message: &EmailMessage) -> Result<usize, MailerError>;

    /// Send a batch of messages, one after another.
    ///
    /// # Arguments
    /// * `messages` - The [`EmailMessage`]s to send.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] containing the total number of accepted recipients
    /// across the batch, or an [`Err`] containing the first [`MailerError`] encountered.
    async fn send_messages(&self, messages: &[EmailMessage]) -> Result<usize, MailerError>;
}
