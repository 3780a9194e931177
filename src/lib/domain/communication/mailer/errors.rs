//! Mailer errors

use thiserror::Error;

use crate::domain::communication::transmissions::TransmissionError;

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// The message uses an envelope field the backend doesn't support
    #[error("The SparkPost mailer does not currently support {0}")]
    UnsupportedParam(&'static str),

    /// The message carries content the backend doesn't support
    #[error("{0}")]
    UnsupportedContent(String),

    /// Exactly one of `html` and `text` was given as an inline template
    #[error("Both 'html' and 'text' must be present in the SparkPost parameters")]
    InvalidInlineTemplate,

    /// SparkPost doesn't know the referenced stored template
    #[error("The stored template does not exist")]
    InvalidStoredTemplate(#[source] TransmissionError),

    /// Any other provider error
    #[error(transparent)]
    Provider(#[from] TransmissionError),

    /// Unknown error
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl From<anyhow::Error> for MailerError {
    fn from(err: anyhow::Error) -> Self {
        MailerError::UnknownError(err)
    }
}

impl From<serde_json::Error> for MailerError {
    fn from(err: serde_json::Error) -> Self {
        MailerError::UnknownError(err.into())
    }
}
