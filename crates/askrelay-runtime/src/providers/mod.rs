//! Provider adapters for askrelay-runtime.
//!
//! This module defines the [`LlmProvider`] trait and the two adapters the
//! relay ships with: Gemini (Google Generative Language API) and Hugging
//! Face hosted inference.
//!
//! ## Error taxonomy
//!
//! - [`ProviderError::NotConfigured`]: missing credential or unusable URL, no
//!   network call made
//! - [`ProviderError::Api`]: non-success HTTP status, carries status and body
//! - [`ProviderError::Http`] / [`ProviderError::Timeout`]: transport failures
//!
//! There is no parse error. A success response whose shape is not
//! recognized is returned as raw JSON text (degraded success).
//!
//! ## Security
//!
//! Credentials go through the [`secrets`] module. See [`ApiCredential`].

use async_trait::async_trait;
use reqwest::RequestBuilder;
use std::time::Duration;
use thiserror::Error;

pub mod extract;
mod factory;
mod gemini;
mod huggingface;
pub mod secrets;

pub use factory::{ProviderFactory, ProviderRegistry};
pub use gemini::{GeminiProvider, GeminiProviderFactory};
pub use huggingface::{HuggingFaceProvider, HuggingFaceProviderFactory};
pub use secrets::{ApiCredential, CredentialSource};

/// Errors from provider adapters.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("{provider} API error: {status} {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

/// Provider abstraction allows swapping LLM backends.
///
/// An adapter turns a prompt into an answer string, or a [`ProviderError`]
/// describing why it could not.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send the prompt upstream and return the answer text.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Source identifier recorded when this provider answers.
    fn name(&self) -> &str;

    /// Whether a credential is present (without logging it).
    fn is_configured(&self) -> bool;
}

/// Reject an endpoint without an HTTP scheme before any request is built.
pub(crate) fn require_http_url(url: &str, what: &str) -> Result<(), ProviderError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ProviderError::NotConfigured(format!(
            "{what} must start with http:// or https://, got '{url}'"
        )))
    }
}

/// Send a request and return the body of a success response.
///
/// Non-success statuses become [`ProviderError::Api`] with the response
/// body attached. URLs are stripped from transport errors because the
/// Gemini key travels as a query parameter.
pub(crate) async fn send_checked(
    request: RequestBuilder,
    timeout: Duration,
    provider: &'static str,
) -> Result<String, ProviderError> {
    let response = request
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| transport_error(e, timeout))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| transport_error(e, timeout))?;

    if !status.is_success() {
        return Err(ProviderError::Api {
            provider,
            status: status.as_u16(),
            body,
        });
    }

    Ok(body)
}

fn transport_error(error: reqwest::Error, timeout: Duration) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout(timeout)
    } else {
        ProviderError::Http(error.without_url().to_string())
    }
}
