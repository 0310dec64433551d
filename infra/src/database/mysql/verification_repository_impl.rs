//! MySQL implementation of the VerificationRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use dha_core::domain::entities::{Document, DocumentType, DocumentVerificationRecord};
use dha_core::errors::{DomainError, VerificationError};
use dha_core::repositories::VerificationRepository;

/// MySQL implementation of VerificationRepository
pub struct MySqlVerificationRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlVerificationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn parse_uuid(value: &str) -> Result<Uuid, DomainError> {
        Uuid::parse_str(value).map_err(|e| DomainError::Database(format!("Invalid UUID: {}", e)))
    }

    fn row_to_document(row: &sqlx::mysql::MySqlRow) -> Result<Document, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Database(format!("Failed to get id: {}", e)))?;
        let document_type: String = row
            .try_get("document_type")
            .map_err(|e| DomainError::Database(format!("Failed to get document_type: {}", e)))?;
        let status: String = row
            .try_get("status")
            .map_err(|e| DomainError::Database(format!("Failed to get status: {}", e)))?;

        Ok(Document {
            id: Self::parse_uuid(&id)?,
            document_number: row
                .try_get("document_number")
                .map_err(|e| DomainError::Database(format!("Failed to get document_number: {}", e)))?,
            document_type: DocumentType::from_name(&document_type),
            status: status.parse().map_err(|e: String| DomainError::Database(e))?,
            holder_name: row
                .try_get("holder_name")
                .map_err(|e| DomainError::Database(format!("Failed to get holder_name: {}", e)))?,
            expiry_date: row
                .try_get::<Option<DateTime<Utc>>, _>("expiry_date")
                .map_err(|e| DomainError::Database(format!("Failed to get expiry_date: {}", e)))?,
            revoked_at: row
                .try_get::<Option<DateTime<Utc>>, _>("revoked_at")
                .map_err(|e| DomainError::Database(format!("Failed to get revoked_at: {}", e)))?,
            issued_at: row
                .try_get::<DateTime<Utc>, _>("issued_at")
                .map_err(|e| DomainError::Database(format!("Failed to get issued_at: {}", e)))?,
        })
    }

    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<DocumentVerificationRecord, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Database(format!("Failed to get id: {}", e)))?;
        let document_id: String = row
            .try_get("document_id")
            .map_err(|e| DomainError::Database(format!("Failed to get document_id: {}", e)))?;
        let verification_type: String = row
            .try_get("verification_type")
            .map_err(|e| DomainError::Database(format!("Failed to get verification_type: {}", e)))?;

        Ok(DocumentVerificationRecord {
            id: Self::parse_uuid(&id)?,
            document_id: Self::parse_uuid(&document_id)?,
            verification_code: row
                .try_get("verification_code")
                .map_err(|e| DomainError::Database(format!("Failed to get verification_code: {}", e)))?,
            verification_type: verification_type
                .parse()
                .map_err(|e: String| DomainError::Database(e))?,
            is_valid: row
                .try_get("is_valid")
                .map_err(|e| DomainError::Database(format!("Failed to get is_valid: {}", e)))?,
            verification_count: row
                .try_get("verification_count")
                .map_err(|e| DomainError::Database(format!("Failed to get verification_count: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database(format!("Failed to get created_at: {}", e)))?,
            last_verified_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_verified_at")
                .map_err(|e| DomainError::Database(format!("Failed to get last_verified_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl VerificationRepository for MySqlVerificationRepository {
    async fn create_document(&self, document: Document) -> Result<Document, DomainError> {
        let query = r#"
            INSERT INTO documents
                (id, document_number, document_type, status, holder_name,
                 expiry_date, revoked_at, issued_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(document.id.to_string())
            .bind(&document.document_number)
            .bind(document.document_type.as_str())
            .bind(document.status.as_str())
            .bind(&document.holder_name)
            .bind(document.expiry_date)
            .bind(document.revoked_at)
            .bind(document.issued_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to insert document: {}", e)))?;

        Ok(document)
    }

    async fn find_document_by_number(&self, document_number: &str) -> Result<Option<Document>, DomainError> {
        let query = r#"
            SELECT id, document_number, document_type, status, holder_name,
                   expiry_date, revoked_at, issued_at
            FROM documents
            WHERE document_number = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(document_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_document(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, record: DocumentVerificationRecord) -> Result<DocumentVerificationRecord, DomainError> {
        let query = r#"
            INSERT INTO document_verifications
                (id, document_id, verification_code, verification_type,
                 is_valid, verification_count, created_at, last_verified_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(record.document_id.to_string())
            .bind(&record.verification_code)
            .bind(record.verification_type.as_str())
            .bind(record.is_valid)
            .bind(record.verification_count)
            .bind(record.created_at)
            .bind(record.last_verified_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to insert verification record: {}", e)))?;

        Ok(record)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<DocumentVerificationRecord>, DomainError> {
        let query = r#"
            SELECT id, document_id, verification_code, verification_type,
                   is_valid, verification_count, created_at, last_verified_at
            FROM document_verifications
            WHERE verification_code = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_document(&self, document_id: Uuid) -> Result<Option<DocumentVerificationRecord>, DomainError> {
        let query = r#"
            SELECT id, document_id, verification_code, verification_type,
                   is_valid, verification_count, created_at, last_verified_at
            FROM document_verifications
            WHERE document_id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(document_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn record_verification(&self, record_id: Uuid) -> Result<DocumentVerificationRecord, DomainError> {
        // Single-statement increment so concurrent successful checks
        // never lose a counter bump.
        let query = r#"
            UPDATE document_verifications
            SET verification_count = verification_count + 1, last_verified_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .bind(record_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to record verification: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::Verification(VerificationError::InvalidVerificationCode));
        }

        let query = r#"
            SELECT id, document_id, verification_code, verification_type,
                   is_valid, verification_count, created_at, last_verified_at
            FROM document_verifications
            WHERE id = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(record_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {}", e)))?;

        Self::row_to_record(&row)
    }

    async fn invalidate(&self, document_id: Uuid) -> Result<(), DomainError> {
        let query = r#"
            UPDATE document_verifications
            SET is_valid = FALSE
            WHERE document_id = ?
        "#;

        let result = sqlx::query(query)
            .bind(document_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to invalidate record: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::Verification(VerificationError::InvalidVerificationCode));
        }
        Ok(())
    }
}
