//! Amazon Bedrock runtime implementation of [`ModelInvoker`].

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::info;

use crate::error::DigestError;

use super::provider::ModelProvider;
use super::service::ModelInvoker;

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for [`BedrockModelInvoker`].
#[derive(Clone, PartialEq, Eq)]
pub struct BedrockConfig {
    /// Runtime endpoint, e.g. `https://bedrock-runtime.us-east-1.amazonaws.com`.
    pub endpoint: String,
    /// Model family to invoke.
    pub provider: ModelProvider,
    /// Bedrock API key used for bearer authentication.
    pub api_key: Option<String>,
    /// HTTP timeout.
    pub timeout: Duration,
}

impl Default for BedrockConfig {
    fn default() -> Self {
        Self {
            endpoint: regional_endpoint(DEFAULT_REGION),
            provider: ModelProvider::default(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl std::fmt::Debug for BedrockConfig {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("BedrockConfig")
            .field("endpoint", &self.endpoint)
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl BedrockConfig {
    /// Constructs configuration with required API settings.
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        provider: ModelProvider,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            provider,
            api_key,
            timeout,
        }
    }
}

/// Runtime endpoint for `region`.
#[must_use]
pub fn regional_endpoint(region: &str) -> String {
    format!("https://bedrock-runtime.{region}.amazonaws.com")
}

/// Invokes a Bedrock-hosted model over the runtime REST API.
#[derive(Debug, Clone, Default)]
pub struct BedrockModelInvoker {
    config: BedrockConfig,
}

impl BedrockModelInvoker {
    /// Creates an invoker from explicit configuration.
    #[must_use]
    pub const fn new(config: BedrockConfig) -> Self {
        Self { config }
    }

    fn extract_api_key(&self) -> Result<&str, DigestError> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| DigestError::Configuration {
                message: concat!(
                    "Bedrock API key is required (use --bedrock-api-key, ",
                    "DAIGEST_BEDROCK_API_KEY, or AWS_BEARER_TOKEN_BEDROCK)"
                )
                .to_owned(),
            })
    }

    fn create_http_client(&self) -> Result<Client, DigestError> {
        Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|error| DigestError::Configuration {
                message: format!("failed to configure Bedrock HTTP client: {error}"),
            })
    }
}

impl ModelInvoker for BedrockModelInvoker {
    fn invoke(&self, prompt: &str) -> Result<String, DigestError> {
        let api_key = self.extract_api_key()?;
        let provider = self.config.provider;
        let endpoint = format!(
            "{}/model/{}/invoke",
            self.config.endpoint.trim_end_matches('/'),
            provider.model_id()
        );
        let payload = provider.request_body(prompt)?;
        let client = self.create_http_client()?;

        info!(
            provider = provider.name(),
            prompt_chars = prompt.chars().count(),
            "invoking language model"
        );
        let response = client
            .post(endpoint)
            .bearer_auth(api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&payload)
            .send()
            .map_err(|error| DigestError::Network {
                message: format!("Bedrock request transport failed: {error}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().map_or_else(
                |_| "(failed to read error response body)".to_owned(),
                |content| truncate_for_message(content.as_str(), 160),
            );
            return Err(DigestError::Model {
                message: format!(
                    "{provider} request failed with status {}: {body}",
                    status.as_u16()
                ),
            });
        }

        let body = response.text().map_err(|error| DigestError::Network {
            message: format!("reading Bedrock response failed: {error}"),
        })?;
        provider.parse_completion(&body)
    }
}

fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output = String::new();
    let mut chars = message.chars();

    for _ in 0..max_chars {
        let Some(character) = chars.next() else {
            return output;
        };
        output.push(character);
    }

    if chars.next().is_some() {
        output.push_str("...");
    }

    output
}

#[cfg(test)]
#[path = "bedrock_tests.rs"]
mod tests;
