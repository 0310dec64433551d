//! Document verification record entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of a verification code
pub const CODE_LENGTH: usize = 6;

/// How the verification code is presented on the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationType {
    Qr,
    Barcode,
    Manual,
}

impl VerificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationType::Qr => "qr",
            VerificationType::Barcode => "barcode",
            VerificationType::Manual => "manual",
        }
    }
}

impl std::str::FromStr for VerificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "qr" => Ok(VerificationType::Qr),
            "barcode" => Ok(VerificationType::Barcode),
            "manual" => Ok(VerificationType::Manual),
            _ => Err(format!("Invalid verification type: {}", s)),
        }
    }
}

/// Binds a document to its verification code and usage counter
///
/// Created together with the document at issuance (one-to-one) and never
/// deleted, only invalidated. A record with `is_valid == false` can never
/// authenticate again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentVerificationRecord {
    /// Unique identifier
    pub id: Uuid,

    /// Owning document
    pub document_id: Uuid,

    /// Verification code: exactly 6 uppercase alphanumeric characters
    pub verification_code: String,

    /// Presentation channel of the code
    pub verification_type: VerificationType,

    /// Whether this record may still authenticate
    pub is_valid: bool,

    /// Number of successful verifications
    pub verification_count: i64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Timestamp of the most recent successful verification
    pub last_verified_at: Option<DateTime<Utc>>,
}

impl DocumentVerificationRecord {
    /// Create a record for a newly issued document
    pub fn new(document_id: Uuid, verification_code: String, verification_type: VerificationType) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            verification_code,
            verification_type,
            is_valid: true,
            verification_count: 0,
            created_at: Utc::now(),
            last_verified_at: None,
        }
    }

    /// Record a successful verification
    pub fn record_verification(&mut self) {
        self.verification_count += 1;
        self.last_verified_at = Some(Utc::now());
    }

    /// Permanently invalidate the record (terminal)
    pub fn invalidate(&mut self) {
        self.is_valid = false;
    }
}
