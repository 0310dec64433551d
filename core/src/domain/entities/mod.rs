//! Domain entities for document verification.

pub mod document;
pub mod session;
pub mod verification_record;

pub use document::{Document, DocumentStatus, DocumentType};
pub use session::{SessionStatus, VerificationSession};
pub use verification_record::{DocumentVerificationRecord, VerificationType};
