//! # askrelay-runtime
//!
//! Provider adapters and fallback orchestration for askrelay.
//!
//! A question is normalized by `askrelay-core`, then sent to each provider
//! in priority order (Gemini, then Hugging Face) until one answers. If
//! none does, the caller still gets a record with a simulated answer and
//! the ordered list of provider failures.
//!
//! ## Example
//!
//! ```rust,ignore
//! use askrelay_runtime::{FallbackOrchestrator, RelayConfig};
//!
//! let config = RelayConfig::from_env()?;
//! let orchestrator = FallbackOrchestrator::from_config(&config);
//!
//! let record = orchestrator.ask("What is the capital of France?").await;
//! println!("{} (from {})", record.answer(), record.source());
//! ```

pub mod config;
pub mod fallback;
pub mod orchestrator;
pub mod providers;

#[cfg(test)]
pub(crate) mod test_support;

pub use askrelay_core::AnswerRecord;
pub use config::{ConfigError, ProviderKind, RelayConfig};
pub use fallback::FallbackChain;
pub use orchestrator::{FallbackOrchestrator, ProviderStatus};
pub use providers::{LlmProvider, ProviderError, ProviderRegistry};

/// Log the fallback order and warn when no provider holds a credential.
pub fn log_provider_status(orchestrator: &FallbackOrchestrator, config: &RelayConfig) {
    for status in orchestrator.provider_status() {
        tracing::info!(
            provider = %status.name,
            configured = status.configured,
            description = status.description,
            "Provider in fallback chain"
        );
    }

    if !ProviderKind::PRIORITY
        .iter()
        .any(|&kind| config.has_credential(kind))
    {
        tracing::warn!("No provider credentials configured, answers will be simulated");
    }
}

/// Answer one question with the default provider chain.
pub async fn ask(question: &str, config: &RelayConfig) -> AnswerRecord {
    FallbackOrchestrator::from_config(config).ask(question).await
}
