//! Hugging Face hosted inference provider.
//!
//! Posts `{"inputs": prompt}` to a fixed model endpoint with a bearer token.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use super::{
    extract::{decode_answer, HUGGINGFACE_EXTRACTORS},
    factory::ProviderFactory,
    secrets::{ApiCredential, CredentialSource},
    require_http_url, send_checked, LlmProvider, ProviderError,
};
use crate::config::{
    RelayConfig, DEFAULT_HUGGINGFACE_ENDPOINT, DEFAULT_TIMEOUT, HUGGINGFACE_API_TOKEN_ENV,
};

/// Hugging Face inference provider.
pub struct HuggingFaceProvider {
    credential: Option<ApiCredential>,
    endpoint: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl std::fmt::Debug for HuggingFaceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceProvider")
            .field("credential", &self.credential)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HuggingFaceProvider {
    /// Create a provider with an explicit token and the default model endpoint.
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            credential: Some(ApiCredential::new(
                api_token,
                CredentialSource::Programmatic,
                "Hugging Face API token",
            )),
            endpoint: DEFAULT_HUGGINGFACE_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        Self {
            credential: config.huggingface.api_token.clone(),
            endpoint: config.huggingface.endpoint.clone(),
            timeout: config.timeout,
            client: reqwest::Client::new(),
        }
    }

    /// Point at a different model endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[async_trait]
impl LlmProvider for HuggingFaceProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let credential = self
            .credential
            .as_ref()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                ProviderError::NotConfigured(format!("{} not set", HUGGINGFACE_API_TOKEN_ENV))
            })?;
        require_http_url(&self.endpoint, "Hugging Face endpoint")?;

        let builder = self
            .client
            .post(&self.endpoint)
            .bearer_auth(credential.expose())
            .json(&InferenceRequest { inputs: prompt });

        let body = send_checked(builder, self.timeout, "HuggingFace").await?;
        Ok(decode_answer(&body, HUGGINGFACE_EXTRACTORS))
    }

    fn name(&self) -> &str {
        "huggingface"
    }

    fn is_configured(&self) -> bool {
        self.credential.as_ref().is_some_and(|c| !c.is_empty())
    }
}

/// Factory for creating Hugging Face providers from configuration.
pub struct HuggingFaceProviderFactory;

impl ProviderFactory for HuggingFaceProviderFactory {
    fn provider_type(&self) -> &'static str {
        "huggingface"
    }

    fn create(&self, config: &RelayConfig) -> Arc<dyn LlmProvider> {
        Arc::new(HuggingFaceProvider::from_config(config))
    }

    fn description(&self) -> &'static str {
        "Hugging Face hosted inference (google/flan-t5-large)"
    }
}
