//! Main verification service implementation

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{SessionStatus, VerificationSession};
use crate::errors::{DomainError, DomainResult, VerificationError};
use crate::repositories::{SessionRepository, VerificationRepository};
use crate::validation::{validate_document, validate_session, validate_verification_code};

use super::config::VerificationServiceConfig;
use super::types::VerificationOutcome;

/// Service orchestrating the verification flow
///
/// The validators stay pure; every state change (attempt increments,
/// verification counters, status transitions) goes through the
/// repositories, which serialize per-row updates.
pub struct VerificationService<S: SessionRepository, V: VerificationRepository> {
    /// Session persistence
    sessions: Arc<S>,
    /// Document and verification record persistence
    records: Arc<V>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<S: SessionRepository, V: VerificationRepository> VerificationService<S, V> {
    /// Create a new verification service
    pub fn new(sessions: Arc<S>, records: Arc<V>, config: VerificationServiceConfig) -> Self {
        Self {
            sessions,
            records,
            config,
        }
    }

    /// Start a verification flow: create and persist an active session
    pub async fn start_session(
        &self,
        user_id: Option<Uuid>,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> DomainResult<VerificationSession> {
        let session = VerificationSession::with_limits(
            self.config.session_expiration_minutes,
            self.config.max_attempts,
        )
        .with_client(user_id, ip_address, user_agent);

        let session = self.sessions.create(session).await?;
        tracing::info!(
            session_id = %session.session_id,
            expires_at = %session.expires_at,
            event = "session_started",
            "Started verification session"
        );
        Ok(session)
    }

    /// Verify a code for a document within a session
    ///
    /// This method:
    /// 1. Loads the session and checks its liveness and attempt budget
    /// 2. Records the attempt through the repository (atomic per row)
    /// 3. Loads the document and checks its status
    /// 4. Loads the document's verification record and rejects
    ///    invalidated records
    /// 5. Checks the submitted code against the stored one
    /// 6. Records the successful verification
    ///
    /// Every failure propagates to the caller; nothing is swallowed here.
    pub async fn verify_code(
        &self,
        session_id: &str,
        document_number: &str,
        code: &str,
    ) -> DomainResult<VerificationOutcome> {
        let session = self
            .sessions
            .find_by_session_id(session_id)
            .await?
            .ok_or(DomainError::Verification(VerificationError::SessionNotFound))?;

        if let Err(err) = validate_session(&session) {
            // Persist the expiry transition the first time it is observed.
            if matches!(err, DomainError::Verification(VerificationError::SessionExpired))
                && session.status == SessionStatus::Active
            {
                self.sessions
                    .update_status(session_id, SessionStatus::Expired)
                    .await?;
            }
            tracing::warn!(
                session_id = session_id,
                code = %err.code(),
                attempts = session.attempts,
                event = "session_rejected",
                "Verification session rejected"
            );
            return Err(err);
        }

        // The attempt was allowed to proceed; count it before any further
        // checks so failed code guesses consume the budget.
        let session = self.sessions.record_attempt(session_id).await?;

        let document = self
            .records
            .find_document_by_number(document_number)
            .await?
            .ok_or_else(|| {
                tracing::warn!(
                    session_id = session_id,
                    document_number = document_number,
                    event = "document_not_found",
                    "Verification against unknown document"
                );
                DomainError::Verification(VerificationError::DocumentNotFound {
                    document_number: document_number.to_string(),
                })
            })?;

        if let Err(err) = validate_document(&document) {
            tracing::warn!(
                session_id = session_id,
                document_number = document_number,
                code = %err.code(),
                event = "document_rejected",
                "Document failed verification checks"
            );
            return Err(err);
        }

        let record = self
            .records
            .find_by_document(document.id)
            .await?
            .ok_or(DomainError::Verification(VerificationError::InvalidVerificationCode))?;

        // An invalidated record can never authenticate again, even with
        // the correct code.
        if !record.is_valid {
            tracing::warn!(
                session_id = session_id,
                document_number = document_number,
                event = "record_invalidated",
                "Verification attempted against an invalidated record"
            );
            return Err(VerificationError::InvalidVerificationCode.into());
        }

        validate_verification_code(code, &record.verification_code)?;

        let record = self.records.record_verification(record.id).await?;
        tracing::info!(
            session_id = session_id,
            document_number = document_number,
            verification_count = record.verification_count,
            event = "verification_success",
            "Document successfully verified"
        );

        Ok(VerificationOutcome {
            document_number: document.document_number,
            document_type: document.document_type,
            status: document.status,
            holder_name: document.holder_name,
            verification_count: record.verification_count,
            remaining_attempts: session.remaining_attempts(),
            verified_at: Utc::now(),
        })
    }

    /// Remaining attempts for a session (0 once exhausted)
    pub async fn get_remaining_attempts(&self, session_id: &str) -> DomainResult<i32> {
        let session = self
            .sessions
            .find_by_session_id(session_id)
            .await?
            .ok_or(DomainError::Verification(VerificationError::SessionNotFound))?;
        Ok(session.remaining_attempts())
    }

    /// Explicitly invalidate a session (terminal)
    pub async fn invalidate_session(&self, session_id: &str) -> DomainResult<()> {
        tracing::info!(
            session_id = session_id,
            event = "session_invalidated",
            "Invalidating verification session"
        );
        self.sessions
            .update_status(session_id, SessionStatus::Invalid)
            .await
    }

    /// Permanently invalidate a document's verification record
    pub async fn invalidate_record(&self, document_id: Uuid) -> DomainResult<()> {
        tracing::info!(
            document_id = %document_id,
            event = "record_invalidated",
            "Invalidating document verification record"
        );
        self.records.invalidate(document_id).await
    }
}
