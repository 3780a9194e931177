//! SparkPost configuration

use clap::Parser;
use serde::Deserialize;

/// The SparkPost API endpoint used when none is configured
pub const DEFAULT_BASE_URI: &str = "https://api.sparkpost.com/api/v1";

/// SparkPost configuration
#[derive(Clone, Debug, Parser, Deserialize)]
pub struct SparkPostConfig {
    /// The SparkPost API key
    #[clap(long, env = "SPARKPOST_API_KEY")]
    pub api_key: String,

    /// The SparkPost API base URI
    #[clap(long, env = "SPARKPOST_BASE_URI", default_value = DEFAULT_BASE_URI)]
    #[serde(default = "default_base_uri")]
    pub base_uri: String,

    /// Request timeout in seconds
    #[clap(long, env = "SPARKPOST_TIMEOUT_SECS", default_value = "30")]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl SparkPostConfig {
    /// Create a new configuration for the default endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_uri: default_base_uri(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Point the client at another endpoint, e.g. the EU region or a test server
    #[must_use]
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    /// Override the request timeout
    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// The URL of the transmissions endpoint
    pub fn transmissions_url(&self) -> String {
        format!("{}/transmissions", self.base_uri.trim_end_matches('/'))
    }
}

fn default_base_uri() -> String {
    DEFAULT_BASE_URI.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_new_config_uses_defaults() {
        let config = SparkPostConfig::new("API_Key");

        assert_eq!(config.api_key, "API_Key");
        assert_eq!(config.base_uri, DEFAULT_BASE_URI);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_with_timeout_secs_overrides_default() {
        let config = SparkPostConfig::new("API_Key").with_timeout_secs(5);

        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.base_uri, DEFAULT_BASE_URI);
    }

    #[test]
    fn test_transmissions_url_trims_trailing_slash() {
        let config = SparkPostConfig::new("API_Key").with_base_uri("http://127.0.0.1:8080/api/v1/");

        assert_eq!(
            config.transmissions_url(),
            "http://127.0.0.1:8080/api/v1/transmissions"
        );
    }

    #[test]
    fn test_parse_from_args() -> TestResult {
        let config = SparkPostConfig::try_parse_from([
            "send-mail",
            "--api-key",
            "API_Key",
            "--timeout-secs",
            "5",
        ])?;

        assert_eq!(config.api_key, "API_Key");
        assert_eq!(config.timeout_secs, 5);

        Ok(())
    }

    #[test]
    fn test_deserialize_fills_defaults() -> TestResult {
        let config: SparkPostConfig = serde_json::from_str(r#"{"api_key": "API_Key"}"#)?;

        assert_eq!(config.base_uri, DEFAULT_BASE_URI);
        assert_eq!(config.timeout_secs, 30);

        Ok(())
    }
}
