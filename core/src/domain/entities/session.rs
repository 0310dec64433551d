//! Verification session entity tracking an in-progress verification attempt.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default number of minutes before a session expires
pub const DEFAULT_SESSION_EXPIRATION_MINUTES: i64 = 30;

/// Default maximum number of verification attempts per session
pub const DEFAULT_MAX_ATTEMPTS: i32 = 5;

/// Status of a verification session
///
/// Transitions are one-directional: `Active` may become `Expired` or
/// `Invalid`; there is no reactivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Expired,
    Invalid,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Expired => "expired",
            SessionStatus::Invalid => "invalid",
        }
    }
}

impl std::str::FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SessionStatus::Active),
            "expired" => Ok(SessionStatus::Expired),
            "invalid" => Ok(SessionStatus::Invalid),
            _ => Err(format!("Invalid session status: {}", s)),
        }
    }
}

/// A verification session
///
/// Created when a verification flow starts and mutated on every check:
/// attempts increment and `last_activity` refreshes. Once `attempts`
/// reaches `max_attempts` the session is rejected; the counter is never
/// silently reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationSession {
    /// Opaque unique session identifier
    pub session_id: String,

    /// User who started the flow, when authenticated
    pub user_id: Option<Uuid>,

    /// Client IP address
    pub ip_address: Option<String>,

    /// Client user agent
    pub user_agent: Option<String>,

    /// Session status
    pub status: SessionStatus,

    /// Number of verification attempts made
    pub attempts: i32,

    /// Maximum attempts allowed
    pub max_attempts: i32,

    /// When the session stops accepting attempts
    pub expires_at: DateTime<Utc>,

    /// Timestamp of the most recent check
    pub last_activity: DateTime<Utc>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl VerificationSession {
    /// Create a new active session with default expiry and attempt budget
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_SESSION_EXPIRATION_MINUTES, DEFAULT_MAX_ATTEMPTS)
    }

    /// Create a new active session with a custom expiry and attempt budget
    pub fn with_limits(expiration_minutes: i64, max_attempts: i32) -> Self {
        let now = Utc::now();
        Self {
            session_id: Uuid::new_v4().to_string(),
            user_id: None,
            ip_address: None,
            user_agent: None,
            status: SessionStatus::Active,
            attempts: 0,
            max_attempts,
            expires_at: now + Duration::minutes(expiration_minutes),
            last_activity: now,
            created_at: now,
        }
    }

    /// Attach client context to the session
    pub fn with_client(mut self, user_id: Option<Uuid>, ip_address: Option<String>, user_agent: Option<String>) -> Self {
        self.user_id = user_id;
        self.ip_address = ip_address;
        self.user_agent = user_agent;
        self
    }

    /// Check whether the session has passed its expiry, against the
    /// check-time clock
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Whether the attempt budget has been used up
    pub fn attempts_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }

    /// Remaining attempts (0 once exhausted)
    pub fn remaining_attempts(&self) -> i32 {
        (self.max_attempts - self.attempts).max(0)
    }

    /// Record one verification attempt: increment the counter and refresh
    /// `last_activity`
    pub fn record_attempt(&mut self) {
        self.attempts += 1;
        self.last_activity = Utc::now();
    }

    /// Explicitly invalidate the session (terminal)
    pub fn invalidate(&mut self) {
        self.status = SessionStatus::Invalid;
        self.last_activity = Utc::now();
    }

    /// Mark the session expired (terminal)
    pub fn expire(&mut self) {
        self.status = SessionStatus::Expired;
        self.last_activity = Utc::now();
    }
}

impl Default for VerificationSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_active() {
        let session = VerificationSession::new();
        assert_eq!(session.status, SessionStatus::Active);
        assert_eq!(session.attempts, 0);
        assert_eq!(session.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert!(!session.is_expired());
        assert!(!session.attempts_exhausted());
    }

    #[test]
    fn test_record_attempt_refreshes_activity() {
        let mut session = VerificationSession::new();
        let before = session.last_activity;
        session.record_attempt();
        assert_eq!(session.attempts, 1);
        assert!(session.last_activity >= before);
    }

    #[test]
    fn test_attempt_budget_never_resets() {
        let mut session = VerificationSession::with_limits(30, 3);
        for _ in 0..3 {
            session.record_attempt();
        }
        assert!(session.attempts_exhausted());
        assert_eq!(session.remaining_attempts(), 0);

        // Further attempts still count; the budget does not reset.
        session.record_attempt();
        assert_eq!(session.attempts, 4);
        assert!(session.attempts_exhausted());
        assert_eq!(session.remaining_attempts(), 0);
    }

    #[test]
    fn test_expiry_uses_check_time_clock() {
        let mut session = VerificationSession::new();
        session.expires_at = Utc::now() - Duration::seconds(1);
        assert!(session.is_expired());
    }

    #[test]
    fn test_terminal_transitions() {
        let mut session = VerificationSession::new();
        session.invalidate();
        assert_eq!(session.status, SessionStatus::Invalid);

        let mut session = VerificationSession::new();
        session.expire();
        assert_eq!(session.status, SessionStatus::Expired);
    }

    #[test]
    fn test_with_client_context() {
        let user = Uuid::new_v4();
        let session = VerificationSession::new().with_client(
            Some(user),
            Some("196.25.1.10".to_string()),
            Some("Mozilla/5.0".to_string()),
        );
        assert_eq!(session.user_id, Some(user));
        assert_eq!(session.ip_address.as_deref(), Some("196.25.1.10"));
    }
}
