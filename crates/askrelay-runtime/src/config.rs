//! Relay configuration.
//!
//! Credentials, model name, base URL and timeout are resolved once into a
//! [`RelayConfig`] and handed to the adapters at construction time. Nothing
//! reads or writes process environment after that point.
//!
//! Resolution order for every field: settings file, then environment, then
//! the built-in default.
//!
//! ## Settings file
//!
//! ```yaml
//! gemini:
//!   api_key: "AIza..."
//!   model: "models/text-bison-001"
//!   base_url: "https://generativelanguage.googleapis.com/v1/"
//! huggingface:
//!   api_token: "hf_..."
//! timeout: "60s"
//! ```

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::providers::secrets::{ApiCredential, CredentialSource};

/// Primary environment variable for the Gemini API key.
pub const GOOGLE_API_KEY_ENV: &str = "GOOGLE_API_KEY";
/// Secondary environment variable for the Gemini API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const GEMINI_MODEL_ENV: &str = "GEMINI_MODEL";
pub const GEMINI_BASE_URL_ENV: &str = "GEMINI_BASE_URL";
pub const HUGGINGFACE_API_TOKEN_ENV: &str = "HUGGINGFACE_API_TOKEN";
pub const TIMEOUT_ENV: &str = "ASKRELAY_TIMEOUT";

pub const DEFAULT_GEMINI_MODEL: &str = "models/text-bison-001";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1/";
pub const DEFAULT_HUGGINGFACE_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/google/flan-t5-large";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Sampling temperature sent with every Gemini request.
pub const GEMINI_TEMPERATURE: f32 = 0.2;
/// Output length cap sent with every Gemini request.
pub const GEMINI_MAX_OUTPUT_TOKENS: u32 = 512;

/// Errors while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid timeout '{value}': {source}")]
    InvalidTimeout {
        value: String,
        source: humantime::DurationError,
    },

    #[error("Unknown provider '{0}'. Available: gemini, huggingface")]
    UnknownProvider(String),
}

/// The providers askrelay knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Gemini,
    HuggingFace,
}

impl ProviderKind {
    /// Fixed priority order used by the fallback chain.
    pub const PRIORITY: [ProviderKind; 2] = [ProviderKind::Gemini, ProviderKind::HuggingFace];

    /// Source identifier recorded in answer records.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::HuggingFace => "huggingface",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "huggingface" => Ok(ProviderKind::HuggingFace),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

/// Settings for the Google Generative Language API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<ApiCredential>,
    /// Model path, e.g. `models/text-bison-001`
    pub model: String,
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

/// Settings for the Hugging Face hosted inference API.
#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    pub api_token: Option<ApiCredential>,
    /// Full model endpoint URL
    pub endpoint: String,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            endpoint: DEFAULT_HUGGINGFACE_ENDPOINT.to_string(),
        }
    }
}

/// Complete relay configuration, read-only for the duration of a query.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub gemini: GeminiConfig,
    pub huggingface: HuggingFaceConfig,
    /// Per-request timeout for every provider call
    pub timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            gemini: GeminiConfig::default(),
            huggingface: HuggingFaceConfig::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// On-disk settings file layout. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    #[serde(default)]
    gemini: GeminiSettings,
    #[serde(default)]
    huggingface: HuggingFaceSettings,
    timeout: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct GeminiSettings {
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct HuggingFaceSettings {
    api_token: Option<String>,
    endpoint: Option<String>,
}

impl RelayConfig {
    /// Resolve configuration from process environment and defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(SettingsFile::default(), env_lookup)
    }

    /// Resolve configuration from a YAML settings document, with
    /// environment fallback for fields it leaves out.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let settings: SettingsFile = serde_yaml::from_str(yaml)?;
        Self::resolve(settings, env_lookup)
    }

    /// Resolve configuration from a YAML settings file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    fn resolve<F>(settings: SettingsFile, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let gemini_key = match non_blank(settings.gemini.api_key) {
            Some(key) => Some(ApiCredential::new(key, CredentialSource::File, "Gemini API key")),
            None => ApiCredential::from_lookup(
                &[GOOGLE_API_KEY_ENV, GEMINI_API_KEY_ENV],
                &lookup,
                "Gemini API key",
            ),
        };

        let model = non_blank(settings.gemini.model)
            .or_else(|| var(GEMINI_MODEL_ENV))
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        let base_url = non_blank(settings.gemini.base_url)
            .or_else(|| var(GEMINI_BASE_URL_ENV))
            .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());

        let hf_token = match non_blank(settings.huggingface.api_token) {
            Some(token) => Some(ApiCredential::new(
                token,
                CredentialSource::File,
                "Hugging Face API token",
            )),
            None => ApiCredential::from_lookup(
                &[HUGGINGFACE_API_TOKEN_ENV],
                &lookup,
                "Hugging Face API token",
            ),
        };

        let endpoint = non_blank(settings.huggingface.endpoint)
            .unwrap_or_else(|| DEFAULT_HUGGINGFACE_ENDPOINT.to_string());

        let timeout = match non_blank(settings.timeout).or_else(|| var(TIMEOUT_ENV)) {
            Some(value) => parse_timeout(&value)?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            gemini: GeminiConfig {
                api_key: gemini_key,
                model,
                base_url: with_trailing_slash(base_url),
            },
            huggingface: HuggingFaceConfig {
                api_token: hf_token,
                endpoint,
            },
            timeout,
        })
    }

    /// Install an inline credential for one provider, overriding any
    /// file or environment value.
    pub fn with_credential(mut self, provider: ProviderKind, key: impl Into<String>) -> Self {
        match provider {
            ProviderKind::Gemini => {
                self.gemini.api_key = Some(ApiCredential::new(
                    key,
                    CredentialSource::CommandLine,
                    "Gemini API key",
                ));
            }
            ProviderKind::HuggingFace => {
                self.huggingface.api_token = Some(ApiCredential::new(
                    key,
                    CredentialSource::CommandLine,
                    "Hugging Face API token",
                ));
            }
        }
        self
    }

    /// Override the Gemini model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.gemini.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether a credential is present for the given provider.
    pub fn has_credential(&self, provider: ProviderKind) -> bool {
        let credential = match provider {
            ProviderKind::Gemini => &self.gemini.api_key,
            ProviderKind::HuggingFace => &self.huggingface.api_token,
        };
        credential.as_ref().is_some_and(|c| !c.is_empty())
    }
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn with_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

/// Parse a human-readable duration such as `60s` or `1m 30s`.
pub fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value.trim()).map_err(|source| ConfigError::InvalidTimeout {
        value: value.to_string(),
        source,
    })
}
