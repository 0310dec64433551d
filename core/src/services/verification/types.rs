//! Result types for verification operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{DocumentStatus, DocumentType};

/// Outcome of a successful verification check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationOutcome {
    /// Number of the verified document
    pub document_number: String,

    /// Category of the verified document
    pub document_type: DocumentType,

    /// Document status at verification time (always `Issued` on success)
    pub status: DocumentStatus,

    /// Holder name, when the document carries one
    pub holder_name: Option<String>,

    /// Total successful verifications for this document, including this one
    pub verification_count: i64,

    /// Attempts the session has left after this check
    pub remaining_attempts: i32,

    /// When this verification completed
    pub verified_at: DateTime<Utc>,
}
