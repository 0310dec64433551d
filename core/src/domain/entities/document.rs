//! Document entity and document-type prefix table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of an issued document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Document is issued and verifiable
    Issued,
    /// Document has been revoked by the issuing authority
    Revoked,
    /// Document has passed its expiry date
    Expired,
    /// Document is administratively inactive
    Inactive,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Issued => "issued",
            DocumentStatus::Revoked => "revoked",
            DocumentStatus::Expired => "expired",
            DocumentStatus::Inactive => "inactive",
        }
    }
}

impl std::str::FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "issued" => Ok(DocumentStatus::Issued),
            "revoked" => Ok(DocumentStatus::Revoked),
            "expired" => Ok(DocumentStatus::Expired),
            "inactive" => Ok(DocumentStatus::Inactive),
            _ => Err(format!("Invalid document status: {}", s)),
        }
    }
}

/// Document categories issued by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    PermanentResidencePermit,
    NaturalisationCertificate,
    WorkPermit,
    RetiredPersonVisa,
    RefugeeTravelDocument,
    BirthCertificate,
    /// Anything the prefix table does not know
    Other,
}

impl DocumentType {
    /// Document-number prefix for this type
    pub fn prefix(&self) -> &'static str {
        match self {
            DocumentType::PermanentResidencePermit => "PRP",
            DocumentType::NaturalisationCertificate => "NAT",
            DocumentType::WorkPermit => "WP",
            DocumentType::RetiredPersonVisa => "RV",
            DocumentType::RefugeeTravelDocument => "REF",
            DocumentType::BirthCertificate => "BC",
            DocumentType::Other => "DOC",
        }
    }

    /// Canonical type name, as persisted and accepted by `from_name`
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::PermanentResidencePermit => "permanent_residence_permit",
            DocumentType::NaturalisationCertificate => "naturalisation_certificate",
            DocumentType::WorkPermit => "work_permit",
            DocumentType::RetiredPersonVisa => "retired_person_visa",
            DocumentType::RefugeeTravelDocument => "refugee_travel_document",
            DocumentType::BirthCertificate => "birth_certificate",
            DocumentType::Other => "other",
        }
    }

    /// Parse a type name, falling back to `Other` for unknown types
    ///
    /// Unknown names are not an error: the generator must still produce a
    /// number for them, under the default `DOC` prefix.
    pub fn from_name(name: &str) -> Self {
        match name {
            "permanent_residence_permit" => DocumentType::PermanentResidencePermit,
            "naturalisation_certificate" => DocumentType::NaturalisationCertificate,
            "work_permit" => DocumentType::WorkPermit,
            "retired_person_visa" => DocumentType::RetiredPersonVisa,
            "refugee_travel_document" => DocumentType::RefugeeTravelDocument,
            "birth_certificate" => DocumentType::BirthCertificate,
            _ => DocumentType::Other,
        }
    }
}

/// An issued document, the owning side of a verification record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier
    pub id: Uuid,

    /// Human-facing document number, e.g. `BC/2026/08/X7K2P9`
    pub document_number: String,

    /// Document category
    pub document_type: DocumentType,

    /// Lifecycle status
    pub status: DocumentStatus,

    /// Name of the document holder, when captured
    pub holder_name: Option<String>,

    /// Expiry date for documents that carry one
    pub expiry_date: Option<DateTime<Utc>>,

    /// When the document was revoked, if it was
    pub revoked_at: Option<DateTime<Utc>>,

    /// Issuance timestamp
    pub issued_at: DateTime<Utc>,
}

impl Document {
    /// Create a newly issued document
    pub fn new(document_number: String, document_type: DocumentType) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_number,
            document_type,
            status: DocumentStatus::Issued,
            holder_name: None,
            expiry_date: None,
            revoked_at: None,
            issued_at: Utc::now(),
        }
    }

    /// Revoke this document
    pub fn revoke(&mut self) {
        self.status = DocumentStatus::Revoked;
        self.revoked_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_table() {
        assert_eq!(DocumentType::PermanentResidencePermit.prefix(), "PRP");
        assert_eq!(DocumentType::BirthCertificate.prefix(), "BC");
        assert_eq!(DocumentType::Other.prefix(), "DOC");
    }

    #[test]
    fn test_from_name_falls_back_to_other() {
        assert_eq!(DocumentType::from_name("birth_certificate"), DocumentType::BirthCertificate);
        assert_eq!(DocumentType::from_name("work_permit"), DocumentType::WorkPermit);
        assert_eq!(DocumentType::from_name("drivers_licence"), DocumentType::Other);
    }

    #[test]
    fn test_revoke_sets_status_and_timestamp() {
        let mut doc = Document::new("BC/2026/08/ABC123".to_string(), DocumentType::BirthCertificate);
        assert_eq!(doc.status, DocumentStatus::Issued);
        doc.revoke();
        assert_eq!(doc.status, DocumentStatus::Revoked);
        assert!(doc.revoked_at.is_some());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            DocumentStatus::Issued,
            DocumentStatus::Revoked,
            DocumentStatus::Expired,
            DocumentStatus::Inactive,
        ] {
            assert_eq!(status.as_str().parse::<DocumentStatus>().unwrap(), status);
        }
    }
}
