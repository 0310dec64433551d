//! Domain-specific error types and error handling.

mod types;

pub use types::{RateLimitError, SecurityError, Severity, ValidationError, VerificationError};

use dha_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Umbrella error for the domain layer
///
/// Bridges the four taxonomy kinds and adds infrastructure-facing variants
/// for persistence and internal failures. Validators and services never
/// swallow these; every failure propagates to the caller.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Security(#[from] SecurityError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    RateLimit(#[from] RateLimitError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Stable error code for client identification
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Verification(e) => e.code(),
            DomainError::Security(e) => e.code(),
            DomainError::Validation(e) => e.code(),
            DomainError::RateLimit(e) => e.code(),
            DomainError::Database(_) => error_codes::DATABASE_ERROR,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
        }
    }
}

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Verification(e) => e.into(),
            DomainError::Security(e) => e.into(),
            DomainError::Validation(e) => e.into(),
            DomainError::RateLimit(e) => e.into(),
            other => ErrorResponse::new("InternalError", other.to_string(), other.code()),
        }
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            DomainError::Verification(e) => e.clone().into(),
            DomainError::Security(e) => e.clone().into(),
            DomainError::Validation(e) => e.clone().into(),
            DomainError::RateLimit(e) => e.clone().into(),
            other => ErrorResponse::new("InternalError", other.to_string(), other.code()),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
