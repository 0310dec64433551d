//! Error taxonomy for document verification
//!
//! Four error kinds, each carrying a stable machine-readable code and
//! contextual payload. The kinds map one-to-one onto the caller-facing
//! `{ name, message, code, details? }` shape via the `ErrorResponse`
//! conversions at the bottom of this module.

use dha_shared::errors::{error_codes, ErrorResponse};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity grading for security-relevant errors
///
/// `Low` and `Medium` are intended for alerting and are not necessarily
/// request-fatal; `High` and `Critical` are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Business-rule violations against documents, sessions, and codes
///
/// These are not retryable without a new document or session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Document has been revoked")]
    DocumentRevoked,

    #[error("Document has expired")]
    DocumentExpired,

    #[error("Document is inactive")]
    DocumentInactive,

    #[error("Document not found: {document_number}")]
    DocumentNotFound { document_number: String },

    #[error("Verification session has expired")]
    SessionExpired,

    #[error("Verification session is invalid")]
    SessionInvalid,

    #[error("Maximum verification attempts exceeded ({attempts}/{max_attempts})")]
    SessionLimitExceeded { attempts: i32, max_attempts: i32 },

    #[error("Verification session not found")]
    SessionNotFound,

    #[error("Invalid verification code")]
    InvalidVerificationCode,
}

impl VerificationError {
    /// Stable error code for client identification
    pub fn code(&self) -> &'static str {
        match self {
            VerificationError::DocumentRevoked => error_codes::DOCUMENT_REVOKED,
            VerificationError::DocumentExpired => error_codes::DOCUMENT_EXPIRED,
            VerificationError::DocumentInactive => error_codes::DOCUMENT_INACTIVE,
            VerificationError::DocumentNotFound { .. } => error_codes::DOCUMENT_NOT_FOUND,
            VerificationError::SessionExpired => error_codes::SESSION_EXPIRED,
            VerificationError::SessionInvalid => error_codes::SESSION_INVALID,
            VerificationError::SessionLimitExceeded { .. } => error_codes::SESSION_LIMIT_EXCEEDED,
            VerificationError::SessionNotFound => error_codes::SESSION_NOT_FOUND,
            VerificationError::InvalidVerificationCode => error_codes::INVALID_VERIFICATION_CODE,
        }
    }
}

/// Security-relevant failures, graded by severity for alerting
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SecurityError {
    #[error("Security check failed: {check_type}")]
    CheckFailed {
        check_type: String,
        reason: String,
        severity: Severity,
    },

    #[error("Invalid API key")]
    ApiKeyInvalid,

    #[error("No valid credential available for pool: {pool}")]
    NoValidCredential { pool: String },
}

impl SecurityError {
    /// Stable error code for client identification
    pub fn code(&self) -> &'static str {
        match self {
            SecurityError::CheckFailed { .. } => error_codes::SECURITY_CHECK_FAILED,
            SecurityError::ApiKeyInvalid => error_codes::API_KEY_INVALID,
            SecurityError::NoValidCredential { .. } => error_codes::NO_VALID_CREDENTIAL,
        }
    }

    /// Severity of this error
    pub fn severity(&self) -> Severity {
        match self {
            SecurityError::CheckFailed { severity, .. } => *severity,
            SecurityError::ApiKeyInvalid => Severity::Medium,
            SecurityError::NoValidCredential { .. } => Severity::Critical,
        }
    }
}

/// Malformed-input failures, recoverable by retrying with corrected input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },
}

impl ValidationError {
    /// Stable error code for client identification
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingRequiredField { .. } => error_codes::MISSING_REQUIRED_FIELD,
            ValidationError::InvalidFormat { .. } => error_codes::INVALID_FORMAT,
        }
    }

    /// The field that failed validation
    pub fn field(&self) -> &str {
        match self {
            ValidationError::MissingRequiredField { field } => field,
            ValidationError::InvalidFormat { field } => field,
        }
    }
}

/// Request-budget violation, retryable after `reset_in` seconds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Rate limit exceeded: {limit} requests per {window_seconds} seconds")]
pub struct RateLimitError {
    /// Maximum requests permitted per window
    pub limit: u32,

    /// Window length in seconds
    pub window_seconds: u64,

    /// Seconds until the current window resets
    pub reset_in: u64,
}

impl RateLimitError {
    /// Stable error code for client identification
    pub fn code(&self) -> &'static str {
        error_codes::RATE_LIMIT_EXCEEDED
    }
}

impl From<VerificationError> for ErrorResponse {
    fn from(err: VerificationError) -> Self {
        let response = ErrorResponse::new("VerificationError", err.to_string(), err.code());
        match err {
            VerificationError::DocumentNotFound { document_number } => {
                response.add_detail("document_number", document_number)
            }
            VerificationError::SessionLimitExceeded { attempts, max_attempts } => response
                .add_detail("attempts", attempts)
                .add_detail("max_attempts", max_attempts),
            _ => response,
        }
    }
}

impl From<SecurityError> for ErrorResponse {
    fn from(err: SecurityError) -> Self {
        let severity = err.severity();
        let response = ErrorResponse::new("SecurityError", err.to_string(), err.code())
            .add_detail("severity", severity.to_string());
        match err {
            SecurityError::CheckFailed { check_type, reason, .. } => response
                .add_detail("check_type", check_type)
                .add_detail("reason", reason),
            SecurityError::NoValidCredential { pool } => response.add_detail("pool", pool),
            SecurityError::ApiKeyInvalid => response,
        }
    }
}

impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        ErrorResponse::new("ValidationError", err.to_string(), err.code())
            .add_detail("field", field)
    }
}

impl From<RateLimitError> for ErrorResponse {
    fn from(err: RateLimitError) -> Self {
        let code = err.code();
        ErrorResponse::new("RateLimitError", err.to_string(), code)
            .add_detail("limit", err.limit)
            .add_detail("window_seconds", err.window_seconds)
            .add_detail("reset_in", err.reset_in)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_error_codes() {
        assert_eq!(VerificationError::DocumentRevoked.code(), "DOCUMENT_REVOKED");
        assert_eq!(VerificationError::SessionExpired.code(), "SESSION_EXPIRED");
        assert_eq!(
            VerificationError::SessionLimitExceeded { attempts: 5, max_attempts: 5 }.code(),
            "SESSION_LIMIT_EXCEEDED"
        );
    }

    #[test]
    fn test_security_error_severity() {
        let err = SecurityError::CheckFailed {
            check_type: "watermark".to_string(),
            reason: "missing".to_string(),
            severity: Severity::High,
        };
        assert_eq!(err.severity(), Severity::High);
        assert_eq!(SecurityError::ApiKeyInvalid.severity(), Severity::Medium);
        assert_eq!(
            SecurityError::NoValidCredential { pool: "openai".to_string() }.severity(),
            Severity::Critical
        );
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_error_response_conversion() {
        let err = SecurityError::CheckFailed {
            check_type: "mrz".to_string(),
            reason: "checksum mismatch".to_string(),
            severity: Severity::Critical,
        };
        let response: ErrorResponse = err.into();
        assert_eq!(response.name, "SecurityError");
        assert_eq!(response.code, "SECURITY_CHECK_FAILED");
        let details = response.details.unwrap();
        assert_eq!(details["check_type"], "mrz");
        assert_eq!(details["reason"], "checksum mismatch");
        assert_eq!(details["severity"], "critical");
    }

    #[test]
    fn test_rate_limit_error_details() {
        let err = RateLimitError { limit: 100, window_seconds: 60, reset_in: 42 };
        let response: ErrorResponse = err.into();
        assert_eq!(response.name, "RateLimitError");
        let details = response.details.unwrap();
        assert_eq!(details["limit"], 100);
        assert_eq!(details["window_seconds"], 60);
        assert_eq!(details["reset_in"], 42);
    }

    #[test]
    fn test_validation_error_field() {
        let err = ValidationError::MissingRequiredField { field: "document_number".to_string() };
        assert_eq!(err.field(), "document_number");
        let response: ErrorResponse = err.into();
        assert_eq!(response.details.unwrap()["field"], "document_number");
    }
}
