//! Credential pool selection for external providers
//!
//! A pool is an ordered list of candidate keys plus an externally supplied
//! probe; the selector is agnostic to which service is being targeted. An
//! optional caller override is probed first and falls through to the pool
//! when it does not validate. Probes run sequentially under a bounded
//! timeout; a probe failure of any kind means "invalid", never fatal.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use dha_shared::config::CredentialPoolConfig;

use crate::errors::{DomainResult, SecurityError};

/// Probe transport failures
///
/// Both variants are treated as "candidate invalid" by the selector.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("network error: {0}")]
    Network(String),

    #[error("service returned status {0}")]
    Status(u16),
}

/// Validates a single candidate credential against the target service
///
/// Implementations issue a lightweight authenticated request; `Ok(true)`
/// means the candidate authenticated successfully.
#[async_trait]
pub trait CredentialProbe: Send + Sync {
    async fn probe(&self, candidate: &str) -> Result<bool, ProbeError>;
}

/// Probe one candidate under the configured timeout
///
/// Timeouts, transport errors, and explicit rejections all collapse to
/// `false`. Logs never include the candidate itself.
async fn candidate_is_valid<P>(probe: &P, pool: &str, index: usize, candidate: &str, timeout: Duration) -> bool
where
    P: CredentialProbe + ?Sized,
{
    match tokio::time::timeout(timeout, probe.probe(candidate)).await {
        Ok(Ok(valid)) => valid,
        Ok(Err(err)) => {
            tracing::debug!(
                pool = pool,
                candidate_index = index,
                error = %err,
                event = "credential_probe_failed",
                "Credential probe failed; trying next candidate"
            );
            false
        }
        Err(_) => {
            tracing::debug!(
                pool = pool,
                candidate_index = index,
                event = "credential_probe_timeout",
                "Credential probe timed out; trying next candidate"
            );
            false
        }
    }
}

/// Select a working credential from a pool
///
/// 1. If `override_key` is supplied, probe it and return it when valid;
///    otherwise fall through to the pool.
/// 2. Probe pool candidates in order; the first valid one wins.
/// 3. An empty or exhausted pool fails with `NO_VALID_CREDENTIAL`, naming
///    only the pool.
pub async fn select_credential<P>(
    pool: &CredentialPoolConfig,
    override_key: Option<&str>,
    probe: &P,
    probe_timeout: Duration,
) -> DomainResult<String>
where
    P: CredentialProbe + ?Sized,
{
    if let Some(key) = override_key {
        if candidate_is_valid(probe, &pool.name, 0, key, probe_timeout).await {
            tracing::debug!(pool = %pool.name, event = "credential_override_accepted", "Caller-supplied credential validated");
            return Ok(key.to_string());
        }
        tracing::warn!(
            pool = %pool.name,
            event = "credential_override_rejected",
            "Caller-supplied credential failed validation; falling back to pool"
        );
    }

    for (index, candidate) in pool.keys.iter().enumerate() {
        if candidate_is_valid(probe, &pool.name, index, candidate, probe_timeout).await {
            tracing::info!(
                pool = %pool.name,
                candidate_index = index,
                event = "credential_selected",
                "Selected pool credential"
            );
            return Ok(candidate.clone());
        }
    }

    tracing::error!(
        pool = %pool.name,
        pool_size = pool.keys.len(),
        event = "credential_pool_exhausted",
        "No valid credential available"
    );
    Err(SecurityError::NoValidCredential { pool: pool.name.clone() }.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TIMEOUT: Duration = Duration::from_secs(5);

    /// Accepts exactly one key and counts probe calls
    struct KeyedProbe {
        valid: &'static str,
        calls: AtomicUsize,
    }

    impl KeyedProbe {
        fn new(valid: &'static str) -> Self {
            Self { valid, calls: AtomicUsize::new(0) }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CredentialProbe for KeyedProbe {
        async fn probe(&self, candidate: &str) -> Result<bool, ProbeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(candidate == self.valid)
        }
    }

    /// Fails with a network error for every candidate
    struct FailingProbe;

    #[async_trait]
    impl CredentialProbe for FailingProbe {
        async fn probe(&self, _candidate: &str) -> Result<bool, ProbeError> {
            Err(ProbeError::Network("connection refused".to_string()))
        }
    }

    /// Never completes within any reasonable timeout
    struct HangingProbe;

    #[async_trait]
    impl CredentialProbe for HangingProbe {
        async fn probe(&self, _candidate: &str) -> Result<bool, ProbeError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(true)
        }
    }

    fn pool(keys: &[&str]) -> CredentialPoolConfig {
        CredentialPoolConfig {
            name: "openai".to_string(),
            keys: keys.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_first_valid_candidate_wins() {
        let probe = KeyedProbe::new("sk-b");
        let selected = select_credential(&pool(&["sk-a", "sk-b", "sk-c"]), None, &probe, TIMEOUT)
            .await
            .unwrap();
        assert_eq!(selected, "sk-b");
        // sk-c is never probed once sk-b validates.
        assert_eq!(probe.calls(), 2);
    }

    #[tokio::test]
    async fn test_valid_override_short_circuits_pool() {
        let probe = KeyedProbe::new("sk-override");
        let selected = select_credential(&pool(&["sk-a"]), Some("sk-override"), &probe, TIMEOUT)
            .await
            .unwrap();
        assert_eq!(selected, "sk-override");
        assert_eq!(probe.calls(), 1);
    }

    #[tokio::test]
    async fn test_invalid_override_falls_through_to_pool() {
        let probe = KeyedProbe::new("sk-a");
        let selected = select_credential(&pool(&["sk-a"]), Some("sk-bad"), &probe, TIMEOUT)
            .await
            .unwrap();
        assert_eq!(selected, "sk-a");
        assert_eq!(probe.calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_pool_fails_immediately() {
        let probe = KeyedProbe::new("sk-a");
        let err = select_credential(&pool(&[]), None, &probe, TIMEOUT).await.unwrap_err();
        assert_eq!(err.code(), "NO_VALID_CREDENTIAL");
        assert_eq!(probe.calls(), 0);
    }

    #[tokio::test]
    async fn test_probe_errors_are_not_fatal() {
        let err = select_credential(&pool(&["sk-a", "sk-b"]), None, &FailingProbe, TIMEOUT)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NO_VALID_CREDENTIAL");
        // The error names the pool, never the candidates tried.
        let message = err.to_string();
        assert!(message.contains("openai"));
        assert!(!message.contains("sk-a"));
        assert!(!message.contains("sk-b"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_probe_times_out() {
        let err = select_credential(&pool(&["sk-a"]), None, &HangingProbe, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NO_VALID_CREDENTIAL");
    }
}
