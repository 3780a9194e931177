//! The remote send capability

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[cfg(test)]
use mockall::mock;

mod errors;

pub use errors::{ApiErrorRecord, TransmissionError};

/// SparkPost's error code for a stored template that doesn't exist
pub const TEMPLATE_NOT_FOUND: &str = "1603";

/// The flat parameter mapping handed to [`Transmissions::send`]
///
/// Keys follow the SparkPost client conventions: `recipients`, `from_email`,
/// `subject`, `text`, `html`, `template`, `substitution_data` and so on.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SendParameters(Map<String, Value>);

impl SendParameters {
    /// Create an empty parameter mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove a parameter
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Get a parameter
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether a parameter is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Copy every entry of `other` in, replacing existing keys
    pub fn extend<'a>(&mut self, other: impl IntoIterator<Item = (&'a String, &'a Value)>) {
        for (key, value) in other {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Iterate over the parameters
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<Map<String, Value>> for SendParameters {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// The outcome of a transmission
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendResult {
    /// Recipients SparkPost accepted
    pub total_accepted_recipients: usize,

    /// Recipients SparkPost rejected
    pub total_rejected_recipients: usize,

    /// The transmission ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl SendResult {
    /// Create a result with the given counts
    pub fn new(accepted: usize, rejected: usize) -> Self {
        Self {
            total_accepted_recipients: accepted,
            total_rejected_recipients: rejected,
            id: None,
        }
    }
}

/// Sends transmissions to SparkPost
#[async_trait]
pub trait Transmissions: Clone + Send + Sync + 'static {
    /// Send a transmission
    ///
    /// # Arguments
    /// * `params` - The flat [`SendParameters`] for the transmission.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] containing the [`SendResult`] if the API accepted the
    /// transmission, or an [`Err`] containing a [`TransmissionError`].
    async fn send(&self, params: &SendParameters) -> Result<SendResult, TransmissionError>;
}

#[cfg(test)]
mock! {
    pub Transmissions {}

    impl Clone for Transmissions {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl Transmissions for Transmissions {
        async fn send(&self, params: &SendParameters) -> Result<SendResult, TransmissionError>;
    }
}
