//! SparkPost mail backend
//!
//! [`SparkPostBackend`] validates each [`EmailMessage`], flattens it into
//! [`SendParameters`] and hands those to a [`Transmissions`] implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::communication::{
    mailer::{Alternative, EmailMessage, Mailer, MailerError, ProviderOverride},
    transmissions::{SendParameters, Transmissions, TEMPLATE_NOT_FOUND},
};

/// Mail backend that sends through SparkPost transmissions
#[derive(Debug, Clone)]
pub struct SparkPostBackend<T>
where
    T: Transmissions,
{
    transmissions: Arc<T>,
    fail_silently: bool,
}

impl<T> SparkPostBackend<T>
where
    T: Transmissions,
{
    /// Create a new backend that propagates every error
    pub fn new(transmissions: Arc<T>) -> Self {
        Self::with_fail_silently(transmissions, false)
    }

    /// Create a new backend, optionally suppressing per-message failures in
    /// [`Mailer::send_messages`]
    pub fn with_fail_silently(transmissions: Arc<T>, fail_silently: bool) -> Self {
        Self {
            transmissions,
            fail_silently,
        }
    }

    /// Whether per-message failures are suppressed during batch sends
    pub fn fail_silently(&self) -> bool {
        self.fail_silently
    }

    /// The underlying transmissions client
    pub fn transmissions(&self) -> &T {
        &self.transmissions
    }
}

#[async_trait]
impl<T> Mailer for SparkPostBackend<T>
where
    T: Transmissions,
{
    async fn send_message(&self, message: &EmailMessage) -> Result<usize, MailerError> {
        let params = build_parameters(message)?;

        info!(
            recipients = message.to.len(),
            subject = %message.subject,
            "sending transmission"
        );

        match self.transmissions.send(&params).await {
            Ok(result) => {
                debug!(
                    accepted = result.total_accepted_recipients,
                    rejected = result.total_rejected_recipients,
                    "transmission sent"
                );

                Ok(result.total_accepted_recipients)
            }
            Err(err) if err.has_error_code(TEMPLATE_NOT_FOUND) => {
                debug!("TransmissionError -> InvalidStoredTemplate");

                Err(MailerError::InvalidStoredTemplate(err))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn send_messages(&self, messages: &[EmailMessage]) -> Result<usize, MailerError> {
        let mut accepted = 0;

        for message in messages {
            match self.send_message(message).await {
                Ok(count) => accepted += count,
                Err(err) if self.fail_silently => {
                    warn!(error = %err, "suppressing failed send");
                }
                Err(err) => return Err(err),
            }
        }

        Ok(accepted)
    }
}

/// Validate a message and flatten it into transmission parameters.
///
/// Override keys are merged over the derived parameters, then the HTML
/// alternative (if any) is written to `html`, so it beats an override's `html`.
///
/// # Errors
/// - [`MailerError::UnsupportedParam`] if the message has cc, bcc or reply-to addresses.
/// - [`MailerError::UnsupportedContent`] if the message has attachments, or alternatives
///   other than a single HTML part.
/// - [`MailerError::InvalidInlineTemplate`] if the override gives only one of `html`/`text`.
pub fn build_parameters(message: &EmailMessage) -> Result<SendParameters, MailerError> {
    check_unsupported(message)?;
    check_attachments(message)?;
    let html = check_alternatives(message)?;

    let mut params = SendParameters::new();
    params.insert("recipients", serde_json::to_value(&message.to)?);
    params.insert("from_email", message.from_email.as_str());
    params.insert("subject", message.subject.as_str());
    params.insert("text", message.body.as_str());

    if let Some(sparkpost) = message.sparkpost.as_ref().filter(|o| !o.is_empty()) {
        check_inline_template(sparkpost)?;

        if sparkpost.has_stored_template() {
            params.remove("text");
        }

        params.extend(sparkpost.iter());
    }

    if let Some(html) = html {
        params.insert("html", Value::String(html.content.clone()));
    }

    Ok(params)
}

fn check_unsupported(message: &EmailMessage) -> Result<(), MailerError> {
    let fields = [
        ("cc", &message.cc),
        ("bcc", &message.bcc),
        ("reply_to", &message.reply_to),
    ];

    match fields.into_iter().find(|(_, addresses)| !addresses.is_empty()) {
        Some((field, _)) => Err(MailerError::UnsupportedParam(field)),
        None => Ok(()),
    }
}

fn check_attachments(message: &EmailMessage) -> Result<(), MailerError> {
    if message.attachments.is_empty() {
        return Ok(());
    }

    Err(MailerError::UnsupportedContent(
        "The SparkPost mailer does not currently support attachments".to_string(),
    ))
}

fn check_alternatives(message: &EmailMessage) -> Result<Option<&Alternative>, MailerError> {
    match message.alternatives.as_slice() {
        [] => Ok(None),
        [alternative] if alternative.is_html() => Ok(Some(alternative)),
        [alternative] => Err(MailerError::UnsupportedContent(format!(
            "Content type {} is not supported",
            alternative.mimetype
        ))),
        _ => Err(MailerError::UnsupportedContent(
            "Only a single HTML alternative is supported".to_string(),
        )),
    }
}

fn check_inline_template(sparkpost: &ProviderOverride) -> Result<(), MailerError> {
    if sparkpost.contains_key("html") != sparkpost.contains_key("text") {
        return Err(MailerError::InvalidInlineTemplate);
    }

    Ok(())
}
