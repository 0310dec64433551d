//! Session repository trait defining the interface for session persistence.

use async_trait::async_trait;

use crate::domain::entities::{SessionStatus, VerificationSession};
use crate::errors::DomainError;

/// Repository contract for `VerificationSession` persistence
///
/// Implementations must serialize concurrent attempt increments per
/// session row: for all interleavings, the final `attempts` count equals
/// the number of attempts that were allowed to proceed. The MySQL
/// implementation does this with a single atomic `UPDATE`; the mock holds
/// a write lock across the read-modify-write.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a new session
    async fn create(&self, session: VerificationSession) -> Result<VerificationSession, DomainError>;

    /// Find a session by its opaque identifier
    async fn find_by_session_id(&self, session_id: &str) -> Result<Option<VerificationSession>, DomainError>;

    /// Atomically increment the attempt counter and refresh `last_activity`
    ///
    /// Returns the updated session. Increments past `max_attempts` are
    /// still recorded; the budget check belongs to the validators.
    async fn record_attempt(&self, session_id: &str) -> Result<VerificationSession, DomainError>;

    /// Update a session's status (one-directional; callers only move
    /// sessions out of `Active`)
    async fn update_status(&self, session_id: &str, status: SessionStatus) -> Result<(), DomainError>;

    /// Remove sessions whose expiry has passed; returns how many were removed
    async fn delete_expired(&self) -> Result<u64, DomainError>;
}
