//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Max verification requests per client per window
    pub verification_limit: u32,

    /// Rate limit window in seconds
    pub window_seconds: u64,

    /// Max verification attempts per session
    pub attempts_per_session: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            verification_limit: 100,
            window_seconds: 60,
            attempts_per_session: 5,
        }
    }
}

impl RateLimitConfig {
    /// Create a development configuration (more lenient limits)
    pub fn development() -> Self {
        Self {
            verification_limit: 1000,
            ..Default::default()
        }
    }

    /// Create a production configuration (stricter limits)
    pub fn production() -> Self {
        Self::default()
    }
}

fn default_enabled() -> bool {
    true
}
