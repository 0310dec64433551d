//! In-memory implementation of VerificationRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{Document, DocumentVerificationRecord};
use crate::errors::{DomainError, VerificationError};

use super::trait_::VerificationRepository;

/// In-memory verification repository
pub struct MockVerificationRepository {
    documents: Arc<RwLock<HashMap<Uuid, Document>>>,
    records: Arc<RwLock<HashMap<Uuid, DocumentVerificationRecord>>>,
}

impl MockVerificationRepository {
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockVerificationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationRepository for MockVerificationRepository {
    async fn create_document(&self, document: Document) -> Result<Document, DomainError> {
        let mut documents = self.documents.write().await;
        if documents.values().any(|d| d.document_number == document.document_number) {
            return Err(DomainError::Internal {
                message: format!("Duplicate document number: {}", document.document_number),
            });
        }
        documents.insert(document.id, document.clone());
        Ok(document)
    }

    async fn find_document_by_number(&self, document_number: &str) -> Result<Option<Document>, DomainError> {
        let documents = self.documents.read().await;
        Ok(documents.values().find(|d| d.document_number == document_number).cloned())
    }

    async fn create(&self, record: DocumentVerificationRecord) -> Result<DocumentVerificationRecord, DomainError> {
        let mut records = self.records.write().await;
        if records.values().any(|r| r.verification_code == record.verification_code) {
            return Err(DomainError::Internal {
                message: "Duplicate verification code".to_string(),
            });
        }
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<DocumentVerificationRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.values().find(|r| r.verification_code == code).cloned())
    }

    async fn find_by_document(&self, document_id: Uuid) -> Result<Option<DocumentVerificationRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.values().find(|r| r.document_id == document_id).cloned())
    }

    async fn record_verification(&self, record_id: Uuid) -> Result<DocumentVerificationRecord, DomainError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&record_id)
            .ok_or(DomainError::Verification(VerificationError::InvalidVerificationCode))?;
        record.verification_count += 1;
        record.last_verified_at = Some(Utc::now());
        Ok(record.clone())
    }

    async fn invalidate(&self, document_id: Uuid) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        let record = records
            .values_mut()
            .find(|r| r.document_id == document_id)
            .ok_or(DomainError::Verification(VerificationError::InvalidVerificationCode))?;
        record.is_valid = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{DocumentType, VerificationType};

    fn issued() -> (Document, DocumentVerificationRecord) {
        let doc = Document::new("BC/2026/08/ABC123".to_string(), DocumentType::BirthCertificate);
        let record = DocumentVerificationRecord::new(doc.id, "ABC123".to_string(), VerificationType::Qr);
        (doc, record)
    }

    #[tokio::test]
    async fn test_document_and_record_lookup() {
        let repo = MockVerificationRepository::new();
        let (doc, record) = issued();
        repo.create_document(doc.clone()).await.unwrap();
        repo.create(record.clone()).await.unwrap();

        let found = repo.find_document_by_number("BC/2026/08/ABC123").await.unwrap().unwrap();
        assert_eq!(found.id, doc.id);

        let by_code = repo.find_by_code("ABC123").await.unwrap().unwrap();
        assert_eq!(by_code.id, record.id);

        let by_doc = repo.find_by_document(doc.id).await.unwrap().unwrap();
        assert_eq!(by_doc.id, record.id);
    }

    #[tokio::test]
    async fn test_duplicate_document_number_rejected() {
        let repo = MockVerificationRepository::new();
        let (doc, _) = issued();
        repo.create_document(doc.clone()).await.unwrap();

        let dup = Document::new(doc.document_number.clone(), DocumentType::BirthCertificate);
        assert!(repo.create_document(dup).await.is_err());
    }

    #[tokio::test]
    async fn test_record_verification_increments() {
        let repo = MockVerificationRepository::new();
        let (doc, record) = issued();
        repo.create_document(doc).await.unwrap();
        let record = repo.create(record).await.unwrap();

        let updated = repo.record_verification(record.id).await.unwrap();
        assert_eq!(updated.verification_count, 1);
        assert!(updated.last_verified_at.is_some());
    }

    #[tokio::test]
    async fn test_invalidate_is_permanent() {
        let repo = MockVerificationRepository::new();
        let (doc, record) = issued();
        let doc_id = doc.id;
        repo.create_document(doc).await.unwrap();
        repo.create(record).await.unwrap();

        repo.invalidate(doc_id).await.unwrap();
        let record = repo.find_by_document(doc_id).await.unwrap().unwrap();
        assert!(!record.is_valid);
    }
}
