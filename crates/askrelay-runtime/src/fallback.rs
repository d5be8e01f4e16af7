//! Fallback chain - providers tried in priority order.

use std::sync::Arc;

use crate::config::{ProviderKind, RelayConfig};
use crate::providers::{LlmProvider, ProviderRegistry};

/// Ordered list of providers. The first entry has the highest priority.
#[derive(Clone, Default)]
pub struct FallbackChain {
    providers: Vec<Arc<dyn LlmProvider>>,
}

impl FallbackChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider with lower priority than those already added.
    pub fn add(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Build the default chain: Gemini, then Hugging Face.
    pub fn from_config(config: &RelayConfig) -> Self {
        let registry = ProviderRegistry::with_defaults();
        let chain = ProviderKind::PRIORITY
            .iter()
            .filter_map(|kind| registry.create(kind.as_str(), config).ok())
            .collect();
        Self { providers: chain }
    }

    /// Providers in order.
    pub fn providers(&self) -> &[Arc<dyn LlmProvider>] {
        &self.providers
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for FallbackChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackChain")
            .field("providers", &self.names())
            .finish()
    }
}
