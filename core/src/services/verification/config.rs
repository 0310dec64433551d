//! Configuration for the verification service

use dha_shared::config::VerificationConfig;

use crate::domain::entities::session::{DEFAULT_MAX_ATTEMPTS, DEFAULT_SESSION_EXPIRATION_MINUTES};

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Minutes before a verification session expires
    pub session_expiration_minutes: i64,
    /// Maximum number of verification attempts per session
    pub max_attempts: i32,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            session_expiration_minutes: DEFAULT_SESSION_EXPIRATION_MINUTES,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            session_expiration_minutes: config.session_expiration_minutes,
            max_attempts: config.max_attempts,
        }
    }
}
