//! Transmission errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An error record returned by the SparkPost API
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorRecord {
    /// The SparkPost error code, e.g. `"1603"`
    #[serde(default)]
    pub code: String,

    /// A short message
    #[serde(default)]
    pub message: String,

    /// A longer description, when the API gives one
    #[serde(default)]
    pub description: Option<String>,
}

impl ApiErrorRecord {
    /// Create a new error record
    pub fn new(code: &str, message: &str, description: Option<&str>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            description: description.map(str::to_string),
        }
    }
}

/// Errors raised by a [`Transmissions`](super::Transmissions) implementation
#[derive(Debug, Error)]
pub enum TransmissionError {
    /// The API rejected the transmission
    #[error("SparkPost API call failed with status {status}: {}", describe(.errors))]
    Api {
        /// The HTTP status code
        status: u16,

        /// The error records from the response body
        errors: Vec<ApiErrorRecord>,
    },

    /// The request could not be sent or the response could not be read
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// A payload could not be (de)serialized
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// The client is misconfigured
    #[error("invalid SparkPost configuration: {0}")]
    Configuration(String),
}

impl TransmissionError {
    /// The API error records, empty for non-API errors
    pub fn errors(&self) -> &[ApiErrorRecord] {
        match self {
            TransmissionError::Api { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Whether any API error record carries `code`
    pub fn has_error_code(&self, code: &str) -> bool {
        self.errors().iter().any(|record| record.code == code)
    }
}

fn describe(errors: &[ApiErrorRecord]) -> String {
    if errors.is_empty() {
        return "no error details".to_string();
    }

    errors
        .iter()
        .map(|record| match &record.description {
            Some(description) => format!("{} ({}): {}", record.message, record.code, description),
            None => format!("{} ({})", record.message, record.code),
        })
        .collect::<Vec<_>>()
        .join("; ")
}
