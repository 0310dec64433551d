//! Seeder materializing example documents and verification records.

use std::sync::Arc;

use crate::domain::entities::{Document, DocumentType, DocumentVerificationRecord, VerificationType};
use crate::errors::DomainResult;
use crate::repositories::VerificationRepository;
use crate::services::generator::{generate_document_number, generate_verification_code};

/// Materializes example records through the verification repository
///
/// Used by the demo seeding binary and integration tests; issuance always
/// creates the document together with its one-to-one verification record.
pub struct Seeder<V: VerificationRepository> {
    repository: Arc<V>,
}

impl<V: VerificationRepository> Seeder<V> {
    pub fn new(repository: Arc<V>) -> Self {
        Self { repository }
    }

    /// Issue one document of the given type with a fresh number and code
    pub async fn issue_document(
        &self,
        document_type: DocumentType,
        holder_name: Option<String>,
    ) -> DomainResult<(Document, DocumentVerificationRecord)> {
        let mut document = Document::new(generate_document_number(document_type), document_type);
        document.holder_name = holder_name;
        let document = self.repository.create_document(document).await?;

        let record = DocumentVerificationRecord::new(
            document.id,
            generate_verification_code(),
            VerificationType::Qr,
        );
        let record = self.repository.create(record).await?;

        tracing::info!(
            document_number = %document.document_number,
            event = "document_issued",
            "Issued document with verification record"
        );
        Ok((document, record))
    }

    /// Seed one example document of every known type
    pub async fn seed_examples(&self) -> DomainResult<Vec<(Document, DocumentVerificationRecord)>> {
        let types = [
            DocumentType::PermanentResidencePermit,
            DocumentType::NaturalisationCertificate,
            DocumentType::WorkPermit,
            DocumentType::RetiredPersonVisa,
            DocumentType::RefugeeTravelDocument,
            DocumentType::BirthCertificate,
        ];

        let mut issued = Vec::with_capacity(types.len());
        for document_type in types {
            issued.push(self.issue_document(document_type, None).await?);
        }
        Ok(issued)
    }
}
