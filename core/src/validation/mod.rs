//! Pure validation rules for documents, sessions, codes, keys, and budgets
//!
//! Every function here is stateless and side-effect free: it fails fast on
//! the first violated precondition and otherwise returns `Ok(())`. Callers
//! persist any resulting state change (attempt increments, counter bumps);
//! the validators never mutate. Check ordering is contractual: call sites
//! rely on first-match-wins, so the order below must not be rearranged
//! even when several conditions hold at once.

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::entities::{Document, DocumentStatus, SessionStatus, VerificationSession};
use crate::errors::{
    DomainResult, RateLimitError, SecurityError, Severity, ValidationError, VerificationError,
};

/// Verification code format: exactly 6 uppercase alphanumeric characters
static CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]{6}$").expect("code pattern is valid"));

/// One entry in a document's security-feature checklist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityCheck {
    /// Feature that was checked (e.g. "watermark", "qr", "mrz")
    pub check_type: String,

    /// Whether the check passed
    pub passed: bool,

    /// Reason recorded by the checker, used when the check failed
    pub reason: Option<String>,
}

impl SecurityCheck {
    pub fn passed(check_type: impl Into<String>) -> Self {
        Self {
            check_type: check_type.into(),
            passed: true,
            reason: None,
        }
    }

    pub fn failed(check_type: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            check_type: check_type.into(),
            passed: false,
            reason: Some(reason.into()),
        }
    }
}

/// Validate a document's verifiability
///
/// Order: missing number, revoked, expired, inactive. First match wins.
pub fn validate_document(document: &Document) -> DomainResult<()> {
    if document.document_number.trim().is_empty() {
        return Err(ValidationError::MissingRequiredField {
            field: "document_number".to_string(),
        }
        .into());
    }
    match document.status {
        DocumentStatus::Revoked => Err(VerificationError::DocumentRevoked.into()),
        DocumentStatus::Expired => Err(VerificationError::DocumentExpired.into()),
        DocumentStatus::Inactive => Err(VerificationError::DocumentInactive.into()),
        DocumentStatus::Issued => Ok(()),
    }
}

/// Validate a session's liveness and attempt budget
///
/// Order: missing id, expired (against the check-time clock), invalid
/// status, attempt budget. Expiry is checked before status before budget.
pub fn validate_session(session: &VerificationSession) -> DomainResult<()> {
    if session.session_id.trim().is_empty() {
        return Err(ValidationError::MissingRequiredField {
            field: "session_id".to_string(),
        }
        .into());
    }
    if Utc::now() > session.expires_at {
        return Err(VerificationError::SessionExpired.into());
    }
    if session.status == SessionStatus::Invalid {
        return Err(VerificationError::SessionInvalid.into());
    }
    if session.attempts >= session.max_attempts {
        return Err(VerificationError::SessionLimitExceeded {
            attempts: session.attempts,
            max_attempts: session.max_attempts,
        }
        .into());
    }
    Ok(())
}

/// Validate a submitted verification code against the stored one
///
/// Comparison is case-sensitive exact string equality, no normalization.
pub fn validate_verification_code(code: &str, valid_code: &str) -> DomainResult<()> {
    if code.is_empty() {
        return Err(ValidationError::MissingRequiredField {
            field: "verification_code".to_string(),
        }
        .into());
    }
    if !CODE_PATTERN.is_match(code) {
        return Err(ValidationError::InvalidFormat {
            field: "verification_code".to_string(),
        }
        .into());
    }
    if code != valid_code {
        return Err(VerificationError::InvalidVerificationCode.into());
    }
    Ok(())
}

/// Validate a list of security-feature checks
///
/// Short-circuits on the first failed entry; later entries are not
/// inspected.
pub fn validate_security_checks(checks: &[SecurityCheck]) -> DomainResult<()> {
    for check in checks {
        if !check.passed {
            return Err(SecurityError::CheckFailed {
                check_type: check.check_type.clone(),
                reason: check.reason.clone().unwrap_or_default(),
                severity: Severity::High,
            }
            .into());
        }
    }
    Ok(())
}

/// Validate an API key against the expected value (exact compare)
pub fn validate_api_key(api_key: &str, valid_api_key: &str) -> DomainResult<()> {
    if api_key.is_empty() {
        return Err(ValidationError::MissingRequiredField {
            field: "api_key".to_string(),
        }
        .into());
    }
    if api_key != valid_api_key {
        return Err(SecurityError::ApiKeyInvalid.into());
    }
    Ok(())
}

/// Validate a request count against a rate-limit budget
///
/// The error carries `reset_in`, the number of seconds left in the current
/// fixed window. A zero-length window resets immediately.
pub fn validate_rate_limit(request_count: u32, limit: u32, window_seconds: u64) -> DomainResult<()> {
    if request_count >= limit {
        let now = Utc::now().timestamp() as u64;
        let reset_in = match window_seconds {
            0 => 0,
            w => w - (now % w),
        };
        return Err(RateLimitError {
            limit,
            window_seconds,
            reset_in,
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::DocumentType;
    use crate::errors::DomainError;
    use chrono::Duration;

    fn issued_document() -> Document {
        Document::new("BC/2026/08/ABC123".to_string(), DocumentType::BirthCertificate)
    }

    fn code_of(result: DomainResult<()>) -> &'static str {
        result.unwrap_err().code()
    }

    #[test]
    fn test_validate_document_accepts_issued() {
        assert!(validate_document(&issued_document()).is_ok());
    }

    #[test]
    fn test_validate_document_missing_number() {
        let mut doc = issued_document();
        doc.document_number = String::new();
        assert_eq!(code_of(validate_document(&doc)), "MISSING_REQUIRED_FIELD");
    }

    #[test]
    fn test_validate_document_status_codes() {
        for (status, expected) in [
            (DocumentStatus::Revoked, "DOCUMENT_REVOKED"),
            (DocumentStatus::Expired, "DOCUMENT_EXPIRED"),
            (DocumentStatus::Inactive, "DOCUMENT_INACTIVE"),
        ] {
            let mut doc = issued_document();
            doc.status = status;
            assert_eq!(code_of(validate_document(&doc)), expected);
        }
    }

    #[test]
    fn test_validate_document_missing_number_beats_revoked() {
        let mut doc = issued_document();
        doc.document_number = String::new();
        doc.status = DocumentStatus::Revoked;
        assert_eq!(code_of(validate_document(&doc)), "MISSING_REQUIRED_FIELD");
    }

    #[test]
    fn test_validate_session_accepts_active() {
        assert!(validate_session(&VerificationSession::new()).is_ok());
    }

    #[test]
    fn test_validate_session_missing_id() {
        let mut session = VerificationSession::new();
        session.session_id = String::new();
        assert_eq!(code_of(validate_session(&session)), "MISSING_REQUIRED_FIELD");
    }

    #[test]
    fn test_validate_session_expired() {
        let mut session = VerificationSession::new();
        session.expires_at = Utc::now() - Duration::seconds(1);
        assert_eq!(code_of(validate_session(&session)), "SESSION_EXPIRED");
    }

    #[test]
    fn test_validate_session_invalid_status() {
        let mut session = VerificationSession::new();
        session.invalidate();
        assert_eq!(code_of(validate_session(&session)), "SESSION_INVALID");
    }

    #[test]
    fn test_validate_session_limit_exceeded() {
        let mut session = VerificationSession::with_limits(30, 3);
        session.attempts = 3;
        assert_eq!(code_of(validate_session(&session)), "SESSION_LIMIT_EXCEEDED");
    }

    #[test]
    fn test_validate_session_expiry_beats_attempt_budget() {
        // Both expired and over budget: expiry is checked first.
        let mut session = VerificationSession::with_limits(30, 3);
        session.attempts = 3;
        session.expires_at = Utc::now() - Duration::seconds(1);
        assert_eq!(code_of(validate_session(&session)), "SESSION_EXPIRED");
    }

    #[test]
    fn test_validate_session_invalid_status_beats_attempt_budget() {
        let mut session = VerificationSession::with_limits(30, 3);
        session.attempts = 3;
        session.status = SessionStatus::Invalid;
        assert_eq!(code_of(validate_session(&session)), "SESSION_INVALID");
    }

    #[test]
    fn test_validate_code_success() {
        assert!(validate_verification_code("ABC123", "ABC123").is_ok());
    }

    #[test]
    fn test_validate_code_empty() {
        assert_eq!(code_of(validate_verification_code("", "ABC123")), "MISSING_REQUIRED_FIELD");
    }

    #[test]
    fn test_validate_code_format() {
        // Format is rejected regardless of what the stored code is.
        for bad in ["abc123", "ABC12", "ABC1234", "ABC 12", "ABÇ123", "abc!23"] {
            assert_eq!(
                code_of(validate_verification_code(bad, bad)),
                "INVALID_FORMAT",
                "expected INVALID_FORMAT for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_validate_code_case_sensitive_mismatch() {
        // Lowercase input fails the format check before comparison.
        assert_eq!(
            code_of(validate_verification_code("abc123", "ABC123")),
            "INVALID_FORMAT"
        );
        // A well-formed but different code is a mismatch.
        assert_eq!(
            code_of(validate_verification_code("ABC124", "ABC123")),
            "INVALID_VERIFICATION_CODE"
        );
    }

    #[test]
    fn test_security_checks_all_passed() {
        let checks = vec![SecurityCheck::passed("watermark"), SecurityCheck::passed("qr")];
        assert!(validate_security_checks(&checks).is_ok());
    }

    #[test]
    fn test_security_checks_short_circuit() {
        let checks = vec![
            SecurityCheck::passed("watermark"),
            SecurityCheck::failed("x", "y"),
            SecurityCheck::passed("qr"),
        ];
        let err = validate_security_checks(&checks).unwrap_err();
        match err {
            DomainError::Security(SecurityError::CheckFailed { check_type, reason, .. }) => {
                assert_eq!(check_type, "x");
                assert_eq!(reason, "y");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_security_checks_empty_list_passes() {
        assert!(validate_security_checks(&[]).is_ok());
    }

    #[test]
    fn test_validate_api_key() {
        assert!(validate_api_key("sk-valid", "sk-valid").is_ok());
        assert_eq!(code_of(validate_api_key("", "sk-valid")), "MISSING_REQUIRED_FIELD");
        assert_eq!(code_of(validate_api_key("sk-other", "sk-valid")), "API_KEY_INVALID");
    }

    #[test]
    fn test_validate_rate_limit_at_limit() {
        let err = validate_rate_limit(100, 100, 60).unwrap_err();
        assert_eq!(err.code(), "RATE_LIMIT_EXCEEDED");
        match err {
            DomainError::RateLimit(RateLimitError { limit, window_seconds, reset_in }) => {
                assert_eq!(limit, 100);
                assert_eq!(window_seconds, 60);
                assert!(reset_in >= 1 && reset_in <= 60);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_validate_rate_limit_zero_window_resets_immediately() {
        let err = validate_rate_limit(5, 5, 0).unwrap_err();
        assert_eq!(err.code(), "RATE_LIMIT_EXCEEDED");
        match err {
            DomainError::RateLimit(RateLimitError { window_seconds, reset_in, .. }) => {
                assert_eq!(window_seconds, 0);
                assert_eq!(reset_in, 0);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_validate_rate_limit_under_limit() {
        assert!(validate_rate_limit(99, 100, 60).is_ok());
        assert!(validate_rate_limit(0, 1, 60).is_ok());
    }
}
