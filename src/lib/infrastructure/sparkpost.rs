//! SparkPost transmissions client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client};
use tracing::{debug, error, instrument};

use crate::domain::communication::transmissions::{
    SendParameters, SendResult, TransmissionError, Transmissions,
};

mod config;
mod payload;

pub use config::{SparkPostConfig, DEFAULT_BASE_URI};

use payload::{transmission_body, ErrorsEnvelope, ResultsEnvelope};

/// SparkPost transmissions client
#[derive(Debug, Clone)]
pub struct SparkPostClient {
    config: SparkPostConfig,
    client: Client,
}

impl SparkPostClient {
    /// Create a new client
    pub fn new(config: SparkPostConfig) -> Result<Self, TransmissionError> {
        check_api_key(&config)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Create a new client with a pre-built HTTP client
    pub fn with_client(config: SparkPostConfig, client: Client) -> Result<Self, TransmissionError> {
        check_api_key(&config)?;

        Ok(Self { config, client })
    }

    /// The configured API key
    pub fn api_key(&self) -> &str {
        &self.config.api_key
    }
}

fn check_api_key(config: &SparkPostConfig) -> Result<(), TransmissionError> {
    if config.api_key.trim().is_empty() {
        return Err(TransmissionError::Configuration(
            "the API key is empty".to_string(),
        ));
    }

    Ok(())
}

#[async_trait]
impl Transmissions for SparkPostClient {
    #[instrument(skip(self, params), fields(provider = "sparkpost"))]
    async fn send(&self, params: &SendParameters) -> Result<SendResult, TransmissionError> {
        let url = self.config.transmissions_url();
        let body = transmission_body(params);

        debug!(%url, "posting transmission");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, self.config.api_key.as_str())
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let errors = serde_json::from_str::<ErrorsEnvelope>(&text)
                .unwrap_or_default()
                .errors;

            error!(status = status.as_u16(), ?errors, "SparkPost rejected the transmission");

            return Err(TransmissionError::Api {
                status: status.as_u16(),
                errors,
            });
        }

        let envelope: ResultsEnvelope = response.json().await?;

        Ok(envelope.results)
    }
}
