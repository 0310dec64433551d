//! Shared utilities and common types for the DHA Digital Services Platform
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures and stable error codes

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CredentialsConfig, DatabaseConfig, Environment, LoggingConfig, RateLimitConfig,
    VerificationConfig,
};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
