//! Gemini provider (Google Generative Language API, `generateText`).
//!
//! ## Security
//!
//! The API key is passed as the `key` query parameter, so it is exposed only
//! while building the request and stripped from transport error messages.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use super::{
    extract::{decode_answer, GEMINI_EXTRACTORS},
    factory::ProviderFactory,
    secrets::{ApiCredential, CredentialSource},
    require_http_url, send_checked, LlmProvider, ProviderError,
};
use crate::config::{
    RelayConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_TIMEOUT,
    GEMINI_API_KEY_ENV, GEMINI_MAX_OUTPUT_TOKENS, GEMINI_TEMPERATURE, GOOGLE_API_KEY_ENV,
};

/// Gemini text-generation provider.
pub struct GeminiProvider {
    credential: Option<ApiCredential>,
    model: String,
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("credential", &self.credential)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiProvider {
    /// Create a provider with an explicit API key and default endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            credential: Some(ApiCredential::new(
                api_key,
                CredentialSource::Programmatic,
                "Gemini API key",
            )),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            client: reqwest::Client::new(),
        }
    }

    /// Create from relay configuration. A missing key is reported on the
    /// first call, not here.
    pub fn from_config(config: &RelayConfig) -> Self {
        Self {
            credential: config.gemini.api_key.clone(),
            model: config.gemini.model.clone(),
            base_url: config.gemini.base_url.clone(),
            timeout: config.timeout,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `{base}/{model}:generateText`, without the key.
    fn endpoint(&self) -> String {
        let separator = if self.base_url.ends_with('/') { "" } else { "/" };
        format!("{}{}{}:generateText", self.base_url, separator, self.model)
    }
}

/// Gemini `generateText` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateTextRequest<'a> {
    prompt: TextPrompt<'a>,
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct TextPrompt<'a> {
    text: &'a str,
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let credential = self
            .credential
            .as_ref()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                ProviderError::NotConfigured(format!(
                    "{} (or {}) not set",
                    GOOGLE_API_KEY_ENV, GEMINI_API_KEY_ENV
                ))
            })?;
        require_http_url(&self.base_url, "Gemini base URL")?;

        let request = GenerateTextRequest {
            prompt: TextPrompt { text: prompt },
            temperature: GEMINI_TEMPERATURE,
            max_output_tokens: GEMINI_MAX_OUTPUT_TOKENS,
        };

        // SECURITY: Only expose the credential here, at the point of use
        let builder = self
            .client
            .post(self.endpoint())
            .query(&[("key", credential.expose())])
            .header(CONTENT_TYPE, "application/json")
            .json(&request);

        let body = send_checked(builder, self.timeout, "Gemini").await?;
        Ok(decode_answer(&body, GEMINI_EXTRACTORS))
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn is_configured(&self) -> bool {
        self.credential.as_ref().is_some_and(|c| !c.is_empty())
    }
}

/// Factory for creating Gemini providers from configuration.
pub struct GeminiProviderFactory;

impl ProviderFactory for GeminiProviderFactory {
    fn provider_type(&self) -> &'static str {
        "gemini"
    }

    fn create(&self, config: &RelayConfig) -> Arc<dyn LlmProvider> {
        Arc::new(GeminiProvider::from_config(config))
    }

    fn description(&self) -> &'static str {
        "Google Generative Language API (generateText)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderKind;
    use crate::test_support::{closed_port_url, spawn_slow_stub, spawn_stub};
    use axum::http::StatusCode;

    fn stubbed(base_url: &str) -> GeminiProvider {
        GeminiProvider::new("test-gemini-key").with_base_url(format!("{}/v1/", base_url))
    }

    #[test]
    fn test_endpoint_adds_missing_slash() {
        let provider = GeminiProvider::new("k").with_base_url("http://localhost:1/v1beta");
        assert_eq!(
            provider.endpoint(),
            "http://localhost:1/v1beta/models/text-bison-001:generateText"
        );
    }

    #[test]
    fn test_from_config_uses_model_override() {
        let config = RelayConfig::default()
            .with_credential(ProviderKind::Gemini, "k")
            .with_model("models/gemini-pro");
        let provider = GeminiProvider::from_config(&config);

        assert!(provider.is_configured());
        assert_eq!(
            provider.endpoint(),
            "https://generativelanguage.googleapis.com/v1/models/gemini-pro:generateText"
        );
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let provider = GeminiProvider::from_config(&RelayConfig::default());
        assert!(!provider.is_configured());

        match provider.complete("prompt").await {
            Err(ProviderError::NotConfigured(msg)) => {
                assert!(msg.contains("GOOGLE_API_KEY"));
                assert!(msg.contains("GEMINI_API_KEY"));
            }
            other => panic!("Expected NotConfigured, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_base_url_without_scheme_is_not_configured() {
        let provider = GeminiProvider::new("AIza-scheme")
            .with_base_url("generativelanguage.googleapis.com/v1/");

        let err = provider.complete("prompt").await.unwrap_err();
        match &err {
            ProviderError::NotConfigured(msg) => {
                assert!(msg.contains("Gemini base URL"));
                assert!(msg.contains("generativelanguage.googleapis.com/v1/"));
            }
            other => panic!("Expected NotConfigured, got {:?}", other),
        }
        assert!(!err.to_string().contains("AIza-scheme"));
    }

    #[tokio::test]
    async fn test_candidates_response_returns_output() {
        let stub = spawn_stub(StatusCode::OK, r#"{"candidates":[{"output":"Paris"}]}"#).await;
        let provider = stubbed(&stub.base_url);

        let answer = provider.complete("the prompt").await.unwrap();
        assert_eq!(answer, "Paris");

        let requests = stub.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.path, "/v1/models/text-bison-001:generateText");
        assert_eq!(request.query.as_deref(), Some("key=test-gemini-key"));
        assert_eq!(request.body["prompt"]["text"], "the prompt");
        assert_eq!(request.body["temperature"].as_f64(), Some(0.2));
        assert_eq!(request.body["maxOutputTokens"], 512);
    }

    #[tokio::test]
    async fn test_forbidden_is_api_error_with_status() {
        let stub = spawn_stub(StatusCode::FORBIDDEN, r#"{"error":"API key invalid"}"#).await;
        let provider = stubbed(&stub.base_url);

        let err = provider.complete("prompt").await.unwrap_err();
        match &err {
            ProviderError::Api { status, body, .. } => {
                assert_eq!(*status, 403);
                assert!(body.contains("API key invalid"));
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
        assert!(err.to_string().contains("403"));
    }

    #[tokio::test]
    async fn test_unrecognized_success_is_degraded_success() {
        let stub = spawn_stub(StatusCode::OK, r#"{"filters":[{"reason":"OTHER"}]}"#).await;
        let provider = stubbed(&stub.base_url);

        let answer = provider.complete("prompt").await.unwrap();
        assert_eq!(answer, r#"{"filters":[{"reason":"OTHER"}]}"#);
    }

    #[tokio::test]
    async fn test_timeout_reported() {
        let stub = spawn_slow_stub(Duration::from_secs(5)).await;
        let provider = stubbed(&stub.base_url).with_timeout(Duration::from_millis(200));

        let err = provider.complete("prompt").await.unwrap_err();
        assert!(matches!(err, ProviderError::Timeout(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_connection_failure_does_not_leak_key() {
        let base_url = closed_port_url().await;
        let provider = GeminiProvider::new("AIza-leak-check").with_base_url(base_url);

        let err = provider.complete("prompt").await.unwrap_err();
        assert!(matches!(err, ProviderError::Http(_)), "got {:?}", err);
        assert!(!err.to_string().contains("AIza-leak-check"));
    }

    #[test]
    fn test_api_key_not_in_debug_output() {
        let secret_key = "AIza-super-secret-key-12345";
        let provider = GeminiProvider::new(secret_key);

        let debug_output = format!("{:?}", provider);
        assert!(!debug_output.contains(secret_key));
        assert!(debug_output.contains("[REDACTED]"));
    }

    #[test]
    fn test_factory_creates_gemini() {
        let factory = GeminiProviderFactory;
        assert_eq!(factory.provider_type(), "gemini");
        assert_eq!(factory.create(&RelayConfig::default()).name(), "gemini");
    }
}
