//! Secure credential handling for provider adapters.
//!
//! Every API key or token passes through [`ApiCredential`], which:
//!
//! - **Redacts**: credentials never appear in Debug/Display output
//! - **Zeroes on drop**: the value lives in a `secrecy::SecretString`
//! - **Tracks origin**: the [`CredentialSource`] helps diagnose configuration
//!
//! ## Usage
//!
//! ```ignore
//! use askrelay_runtime::providers::secrets::ApiCredential;
//!
//! // First non-empty variable wins
//! let cred = ApiCredential::from_lookup(
//!     &["GOOGLE_API_KEY", "GEMINI_API_KEY"],
//!     |var| std::env::var(var).ok(),
//!     "Gemini API key",
//! );
//!
//! // Use in a query parameter (explicit exposure)
//! request.query(&[("key", cred.expose())]);
//! ```

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Where a credential was loaded from.
///
/// Lets configuration problems be diagnosed without exposing the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Settings file
    File,
    /// Environment variable
    Environment,
    /// Inline `--api-key` argument
    CommandLine,
    /// Provided programmatically
    Programmatic,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::File => write!(f, "settings file"),
            CredentialSource::Environment => write!(f, "environment"),
            CredentialSource::CommandLine => write!(f, "command line"),
            CredentialSource::Programmatic => write!(f, "programmatic"),
        }
    }
}

/// A securely-stored API credential.
///
/// Debug and Display print `[REDACTED]`; the raw value is only reachable
/// through [`ApiCredential::expose`].
pub struct ApiCredential {
    value: SecretString,
    source: CredentialSource,
    name: &'static str,
}

impl ApiCredential {
    /// Wrap a credential value.
    pub fn new(value: impl Into<String>, source: CredentialSource, name: &'static str) -> Self {
        Self {
            value: SecretString::from(value.into()),
            source,
            name,
        }
    }

    /// Load a credential from the first variable with a non-empty value.
    ///
    /// `lookup` resolves a variable name, usually `|v| std::env::var(v).ok()`.
    /// Returns `None` when every variable is unset or blank.
    pub fn from_lookup<F>(vars: &[&str], lookup: F, name: &'static str) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        vars.iter()
            .filter_map(|var| lookup(var))
            .find(|value| !value.trim().is_empty())
            .map(|value| Self::new(value, CredentialSource::Environment, name))
    }

    /// Expose the credential value at the point of use.
    ///
    /// Never store the returned slice.
    pub fn expose(&self) -> &str {
        self.value.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.value.expose_secret().trim().is_empty()
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }

    /// Human-readable name of this credential.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Clone for ApiCredential {
    fn clone(&self) -> Self {
        Self::new(self.expose(), self.source, self.name)
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredential")
            .field("value", &"[REDACTED]")
            .field("source", &self.source)
            .field("name", &self.name)
            .finish()
    }
}

impl fmt::Display for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {} [REDACTED]", self.name, self.source)
    }
}
