//! Business services for document verification.

pub mod credentials;
pub mod generator;
pub mod seeder;
pub mod verification;

pub use credentials::{select_credential, CredentialProbe, ProbeError};
pub use generator::{generate_document_number, generate_verification_code};
pub use seeder::Seeder;
pub use verification::{VerificationOutcome, VerificationService, VerificationServiceConfig};
