//! Shared error response structure and stable error codes

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error shape surfaced to callers across all endpoints
///
/// `name` identifies the error kind (e.g. "VerificationError"), `code` is
/// the stable machine-readable code clients branch on, and `details` carries
/// optional structured context (failing field, remaining attempts, etc.).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error kind name (e.g. "VerificationError", "SecurityError")
    pub name: String,

    /// Human-readable error message
    pub message: String,

    /// Stable error code for client identification
    pub code: String,

    /// Additional error details (field errors, counters, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(name: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            code: code.into(),
            details: None,
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Stable error codes used across the platform
pub mod error_codes {
    pub const MISSING_REQUIRED_FIELD: &str = "MISSING_REQUIRED_FIELD";
    pub const INVALID_FORMAT: &str = "INVALID_FORMAT";
    pub const DOCUMENT_REVOKED: &str = "DOCUMENT_REVOKED";
    pub const DOCUMENT_EXPIRED: &str = "DOCUMENT_EXPIRED";
    pub const DOCUMENT_INACTIVE: &str = "DOCUMENT_INACTIVE";
    pub const DOCUMENT_NOT_FOUND: &str = "DOCUMENT_NOT_FOUND";
    pub const SESSION_EXPIRED: &str = "SESSION_EXPIRED";
    pub const SESSION_INVALID: &str = "SESSION_INVALID";
    pub const SESSION_LIMIT_EXCEEDED: &str = "SESSION_LIMIT_EXCEEDED";
    pub const SESSION_NOT_FOUND: &str = "SESSION_NOT_FOUND";
    pub const INVALID_VERIFICATION_CODE: &str = "INVALID_VERIFICATION_CODE";
    pub const SECURITY_CHECK_FAILED: &str = "SECURITY_CHECK_FAILED";
    pub const API_KEY_INVALID: &str = "API_KEY_INVALID";
    pub const NO_VALID_CREDENTIAL: &str = "NO_VALID_CREDENTIAL";
    pub const RATE_LIMIT_EXCEEDED: &str = "RATE_LIMIT_EXCEEDED";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Trait for converting errors to ErrorResponse
pub trait IntoErrorResponse {
    fn to_error_response(&self) -> ErrorResponse;
}
