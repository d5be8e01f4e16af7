//! Provider factory pattern for building adapters by name.
//!
//! ## Usage
//!
//! ```ignore
//! let registry = ProviderRegistry::with_defaults();
//! let provider = registry.create("gemini", &config)?;
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{LlmProvider, ProviderError};
use crate::config::RelayConfig;

/// Factory for creating provider adapters from relay configuration.
///
/// Construction never fails: adapters report missing credentials when
/// they are first invoked, so the orchestrator can record the failure
/// and move on.
pub trait ProviderFactory: Send + Sync {
    /// Unique identifier, also used as the answer source.
    fn provider_type(&self) -> &'static str;

    /// Create a provider instance from configuration.
    fn create(&self, config: &RelayConfig) -> Arc<dyn LlmProvider>;

    /// Human-readable description of this provider.
    fn description(&self) -> &'static str {
        "LLM Provider"
    }
}

/// Registry of available provider factories, keyed by provider type.
#[derive(Default)]
pub struct ProviderRegistry {
    factories: BTreeMap<String, Arc<dyn ProviderFactory>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider factory.
    ///
    /// If a factory with the same type already exists, it will be replaced.
    pub fn register(&mut self, factory: Arc<dyn ProviderFactory>) {
        self.factories
            .insert(factory.provider_type().to_string(), factory);
    }

    /// Create a provider from type name and configuration.
    pub fn create(
        &self,
        provider_type: &str,
        config: &RelayConfig,
    ) -> Result<Arc<dyn LlmProvider>, ProviderError> {
        self.factories
            .get(provider_type)
            .map(|factory| factory.create(config))
            .ok_or_else(|| {
                ProviderError::NotConfigured(format!(
                    "Unknown provider type: '{}'. Available: {:?}",
                    provider_type,
                    self.available_types()
                ))
            })
    }

    /// List available provider types.
    pub fn available_types(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }

    /// Description of a registered provider type.
    pub fn description(&self, provider_type: &str) -> Option<&'static str> {
        self.factories.get(provider_type).map(|f| f.description())
    }

    /// Create a registry with the built-in providers registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(super::GeminiProviderFactory));
        registry.register(Arc::new(super::HuggingFaceProviderFactory));
        registry
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.available_types())
            .finish()
    }
}
