//! In-memory implementation of SessionRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{SessionStatus, VerificationSession};
use crate::errors::{DomainError, VerificationError};

use super::trait_::SessionRepository;

/// In-memory session repository
///
/// The write lock held across `record_attempt` gives the same no-lost-update
/// guarantee the SQL implementation gets from its atomic `UPDATE`.
pub struct MockSessionRepository {
    sessions: Arc<RwLock<HashMap<String, VerificationSession>>>,
}

impl MockSessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockSessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn create(&self, session: VerificationSession) -> Result<VerificationSession, DomainError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.session_id.clone(), session.clone());
        Ok(session)
    }

    async fn find_by_session_id(&self, session_id: &str) -> Result<Option<VerificationSession>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_id).cloned())
    }

    async fn record_attempt(&self, session_id: &str) -> Result<VerificationSession, DomainError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(session_id)
            .ok_or(DomainError::Verification(VerificationError::SessionNotFound))?;
        session.attempts += 1;
        session.last_activity = Utc::now();
        Ok(session.clone())
    }

    async fn update_status(&self, session_id: &str, status: SessionStatus) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(session_id)
            .ok_or(DomainError::Verification(VerificationError::SessionNotFound))?;
        session.status = status;
        session.last_activity = Utc::now();
        Ok(())
    }

    async fn delete_expired(&self) -> Result<u64, DomainError> {
        let mut sessions = self.sessions.write().await;
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at > now);
        Ok((before - sessions.len()) as u64)
    }
}
