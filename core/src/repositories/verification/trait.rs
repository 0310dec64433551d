//! Verification repository trait for documents and their verification records.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Document, DocumentVerificationRecord};
use crate::errors::DomainError;

/// Repository contract for documents and their one-to-one verification
/// records
///
/// Records are never deleted, only invalidated. `record_verification` must
/// be atomic per record row so concurrent successful checks do not lose
/// counter increments.
#[async_trait]
pub trait VerificationRepository: Send + Sync {
    /// Persist a newly issued document
    async fn create_document(&self, document: Document) -> Result<Document, DomainError>;

    /// Find a document by its human-facing number
    async fn find_document_by_number(&self, document_number: &str) -> Result<Option<Document>, DomainError>;

    /// Persist the verification record created at issuance
    async fn create(&self, record: DocumentVerificationRecord) -> Result<DocumentVerificationRecord, DomainError>;

    /// Find a record by its verification code
    async fn find_by_code(&self, code: &str) -> Result<Option<DocumentVerificationRecord>, DomainError>;

    /// Find the record owned by a document
    async fn find_by_document(&self, document_id: Uuid) -> Result<Option<DocumentVerificationRecord>, DomainError>;

    /// Atomically increment the verification counter and stamp
    /// `last_verified_at`; returns the updated record
    async fn record_verification(&self, record_id: Uuid) -> Result<DocumentVerificationRecord, DomainError>;

    /// Permanently invalidate a document's record
    async fn invalidate(&self, document_id: Uuid) -> Result<(), DomainError>;
}
