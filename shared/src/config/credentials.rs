//! External credential pool configuration
//!
//! Key pools for the third-party LLM providers the platform wraps. Pools
//! are ordered; the selector tries candidates front to back. Built once at
//! startup from the process environment and passed by reference afterwards.

use serde::{Deserialize, Serialize};

/// A named, ordered pool of candidate API keys for one provider
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CredentialPoolConfig {
    /// Pool name used in logs and errors (never the keys themselves)
    pub name: String,

    /// Candidate keys in fallback order
    pub keys: Vec<String>,
}

impl CredentialPoolConfig {
    /// Create a pool from a comma-separated key list
    ///
    /// Empty segments are dropped so a trailing comma in the environment
    /// variable does not produce a blank candidate.
    pub fn from_list(name: impl Into<String>, list: &str) -> Self {
        Self {
            name: name.into(),
            keys: list
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Credential configuration for all external providers
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CredentialsConfig {
    /// OpenAI key pool
    pub openai: CredentialPoolConfig,

    /// Anthropic key pool
    pub anthropic: CredentialPoolConfig,

    /// Per-candidate probe timeout in seconds
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_seconds: u64,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            openai: CredentialPoolConfig {
                name: "openai".to_string(),
                keys: Vec::new(),
            },
            anthropic: CredentialPoolConfig {
                name: "anthropic".to_string(),
                keys: Vec::new(),
            },
            probe_timeout_seconds: default_probe_timeout(),
        }
    }
}

impl CredentialsConfig {
    /// Load credential pools from the process environment
    ///
    /// `OPENAI_API_KEYS` / `ANTHROPIC_API_KEYS` hold comma-separated pools.
    pub fn from_env() -> Self {
        let openai = std::env::var("OPENAI_API_KEYS").unwrap_or_default();
        let anthropic = std::env::var("ANTHROPIC_API_KEYS").unwrap_or_default();
        let probe_timeout_seconds = std::env::var("CREDENTIAL_PROBE_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_probe_timeout);

        Self {
            openai: CredentialPoolConfig::from_list("openai", &openai),
            anthropic: CredentialPoolConfig::from_list("anthropic", &anthropic),
            probe_timeout_seconds,
        }
    }
}

fn default_probe_timeout() -> u64 {
    5
}
