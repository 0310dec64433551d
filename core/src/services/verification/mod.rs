//! Document verification service and its supporting types.

mod config;
mod service;
mod types;


pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use types::VerificationOutcome;
