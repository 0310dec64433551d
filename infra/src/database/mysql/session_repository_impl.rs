//! MySQL implementation of the SessionRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use dha_core::domain::entities::{SessionStatus, VerificationSession};
use dha_core::errors::{DomainError, VerificationError};
use dha_core::repositories::SessionRepository;

/// MySQL implementation of SessionRepository
///
/// Attempt increments run as a single `UPDATE ... SET attempts =
/// attempts + 1`, so concurrent checks against the same session row are
/// serialized by the database and no increment is ever lost.
pub struct MySqlSessionRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlSessionRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_session(row: &sqlx::mysql::MySqlRow) -> Result<VerificationSession, DomainError> {
        let status: String = row
            .try_get("status")
            .map_err(|e| DomainError::Database(format!("Failed to get status: {}", e)))?;
        let user_id: Option<String> = row
            .try_get("user_id")
            .map_err(|e| DomainError::Database(format!("Failed to get user_id: {}", e)))?;

        Ok(VerificationSession {
            session_id: row
                .try_get("session_id")
                .map_err(|e| DomainError::Database(format!("Failed to get session_id: {}", e)))?,
            user_id: user_id
                .map(|id| Uuid::parse_str(&id))
                .transpose()
                .map_err(|e| DomainError::Database(format!("Invalid UUID: {}", e)))?,
            ip_address: row
                .try_get("ip_address")
                .map_err(|e| DomainError::Database(format!("Failed to get ip_address: {}", e)))?,
            user_agent: row
                .try_get("user_agent")
                .map_err(|e| DomainError::Database(format!("Failed to get user_agent: {}", e)))?,
            status: status
                .parse()
                .map_err(|e: String| DomainError::Database(e))?,
            attempts: row
                .try_get("attempts")
                .map_err(|e| DomainError::Database(format!("Failed to get attempts: {}", e)))?,
            max_attempts: row
                .try_get("max_attempts")
                .map_err(|e| DomainError::Database(format!("Failed to get max_attempts: {}", e)))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Database(format!("Failed to get expires_at: {}", e)))?,
            last_activity: row
                .try_get::<DateTime<Utc>, _>("last_activity")
                .map_err(|e| DomainError::Database(format!("Failed to get last_activity: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database(format!("Failed to get created_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl SessionRepository for MySqlSessionRepository {
    async fn create(&self, session: VerificationSession) -> Result<VerificationSession, DomainError> {
        let query = r#"
            INSERT INTO verification_sessions
                (session_id, user_id, ip_address, user_agent, status,
                 attempts, max_attempts, expires_at, last_activity, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&session.session_id)
            .bind(session.user_id.map(|id| id.to_string()))
            .bind(&session.ip_address)
            .bind(&session.user_agent)
            .bind(session.status.as_str())
            .bind(session.attempts)
            .bind(session.max_attempts)
            .bind(session.expires_at)
            .bind(session.last_activity)
            .bind(session.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to insert session: {}", e)))?;

        Ok(session)
    }

    async fn find_by_session_id(&self, session_id: &str) -> Result<Option<VerificationSession>, DomainError> {
        let query = r#"
            SELECT session_id, user_id, ip_address, user_agent, status,
                   attempts, max_attempts, expires_at, last_activity, created_at
            FROM verification_sessions
            WHERE session_id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(session_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_session(&row)?)),
            None => Ok(None),
        }
    }

    async fn record_attempt(&self, session_id: &str) -> Result<VerificationSession, DomainError> {
        // Single-statement increment: the row lock serializes concurrent
        // attempts so none are lost.
        let query = r#"
            UPDATE verification_sessions
            SET attempts = attempts + 1, last_activity = ?
            WHERE session_id = ?
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to record attempt: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::Verification(VerificationError::SessionNotFound));
        }

        self.find_by_session_id(session_id)
            .await?
            .ok_or(DomainError::Verification(VerificationError::SessionNotFound))
    }

    async fn update_status(&self, session_id: &str, status: SessionStatus) -> Result<(), DomainError> {
        let query = r#"
            UPDATE verification_sessions
            SET status = ?, last_activity = ?
            WHERE session_id = ?
        "#;

        let result = sqlx::query(query)
            .bind(status.as_str())
            .bind(Utc::now())
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to update status: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::Verification(VerificationError::SessionNotFound));
        }
        Ok(())
    }

    async fn delete_expired(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM verification_sessions WHERE expires_at < ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to delete expired sessions: {}", e)))?;

        Ok(result.rows_affected())
    }
}
