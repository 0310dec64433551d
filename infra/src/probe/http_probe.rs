//! HTTP credential probes
//!
//! Each probe issues the cheapest authenticated request the provider
//! offers (a model listing) and reports whether the candidate key was
//! accepted. Auth rejections map to `Ok(false)`; transport failures and
//! unexpected statuses surface as `ProbeError`, which the selector also
//! treats as "invalid".

use async_trait::async_trait;
use reqwest::StatusCode;

use dha_core::services::credentials::{CredentialProbe, ProbeError};

const OPENAI_BASE_URL: &str = "https://api.openai.com";
const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

fn classify(status: StatusCode) -> Result<bool, ProbeError> {
    if status.is_success() {
        Ok(true)
    } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        Ok(false)
    } else {
        Err(ProbeError::Status(status.as_u16()))
    }
}

/// Probe validating keys against the OpenAI API
pub struct OpenAiProbe {
    client: reqwest::Client,
    base_url: String,
}

impl OpenAiProbe {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: OPENAI_BASE_URL.to_string(),
        }
    }

    /// Point the probe at a different endpoint (for testing)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl CredentialProbe for OpenAiProbe {
    async fn probe(&self, candidate: &str) -> Result<bool, ProbeError> {
        let response = self
            .client
            .get(format!("{}/v1/models", self.base_url))
            .bearer_auth(candidate)
            .send()
            .await
            .map_err(|e| ProbeError::Network(e.to_string()))?;
        classify(response.status())
    }
}

/// Probe validating keys against the Anthropic API
pub struct AnthropicProbe {
    client: reqwest::Client,
    base_url: String,
}

impl AnthropicProbe {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: ANTHROPIC_BASE_URL.to_string(),
        }
    }

    /// Point the probe at a different endpoint (for testing)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl CredentialProbe for AnthropicProbe {
    async fn probe(&self, candidate: &str) -> Result<bool, ProbeError> {
        let response = self
            .client
            .get(format!("{}/v1/models", self.base_url))
            .header("x-api-key", candidate)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .send()
            .await
            .map_err(|e| ProbeError::Network(e.to_string()))?;
        classify(response.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(classify(StatusCode::OK).unwrap());
        assert!(!classify(StatusCode::UNAUTHORIZED).unwrap());
        assert!(!classify(StatusCode::FORBIDDEN).unwrap());
        assert!(matches!(
            classify(StatusCode::INTERNAL_SERVER_ERROR),
            Err(ProbeError::Status(500))
        ));
        assert!(matches!(
            classify(StatusCode::TOO_MANY_REQUESTS),
            Err(ProbeError::Status(429))
        ));
    }
}
