//! Fallback orchestrator.
//!
//! Turns a raw question into exactly one [`AnswerRecord`]:
//! - Normalize the question and build the prompt (deterministic)
//! - Try each provider of the [`FallbackChain`] strictly in order
//! - Stop at the first success; record every failure on the way
//! - Substitute the simulated answer when every provider failed
//!
//! Provider failures never reach the caller.

use askrelay_core::{build_prompt, normalize, AnswerRecord};

use crate::config::RelayConfig;
use crate::fallback::FallbackChain;
use crate::providers::ProviderRegistry;

/// One provider of the chain as seen at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderStatus {
    pub name: String,
    pub configured: bool,
    pub description: &'static str,
}

/// Sequences provider adapters for one question at a time.
///
/// Holds no per-query state, so one instance can serve concurrent
/// callers (e.g. one task per web request).
#[derive(Debug, Clone)]
pub struct FallbackOrchestrator {
    chain: FallbackChain,
}

impl FallbackOrchestrator {
    pub fn new(chain: FallbackChain) -> Self {
        Self { chain }
    }

    /// Orchestrator over the default Gemini, Hugging Face chain.
    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(FallbackChain::from_config(config))
    }

    pub fn chain(&self) -> &FallbackChain {
        &self.chain
    }

    /// Providers in fallback order, with whether each holds a credential.
    pub fn provider_status(&self) -> Vec<ProviderStatus> {
        let registry = ProviderRegistry::with_defaults();
        self.chain
            .providers()
            .iter()
            .map(|provider| ProviderStatus {
                name: provider.name().to_string(),
                configured: provider.is_configured(),
                description: registry
                    .description(provider.name())
                    .unwrap_or("custom provider"),
            })
            .collect()
    }

    /// Answer a question.
    ///
    /// Empty or whitespace-only questions are accepted and normalize to an
    /// empty processed question.
    pub async fn ask(&self, question: &str) -> AnswerRecord {
        let processed = normalize(question);
        let prompt = build_prompt(&processed);
        let mut errors = Vec::new();

        for provider in self.chain.providers() {
            match provider.complete(&prompt).await {
                Ok(answer) => {
                    tracing::info!(
                        provider = provider.name(),
                        failures = errors.len(),
                        "Provider answered"
                    );
                    return AnswerRecord::answered(
                        question,
                        processed,
                        prompt,
                        answer,
                        provider.name(),
                        errors,
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        provider = provider.name(),
                        error = %e,
                        "Provider failed, trying next"
                    );
                    errors.push(e.to_string());
                }
            }
        }

        tracing::warn!(
            failures = errors.len(),
            "All providers failed, returning simulated answer"
        );
        AnswerRecord::simulated(question, &processed, prompt, errors)
    }
}
