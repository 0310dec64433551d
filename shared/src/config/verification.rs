//! Verification session configuration

use serde::{Deserialize, Serialize};

/// Configuration for verification sessions
///
/// The verification code format itself is fixed (6 uppercase
/// alphanumerics) and not configurable.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Minutes before a verification session expires
    pub session_expiration_minutes: i64,

    /// Maximum number of verification attempts per session
    pub max_attempts: i32,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            session_expiration_minutes: 30,
            max_attempts: 5,
        }
    }
}
