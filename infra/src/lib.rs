//! # Infrastructure Layer
//!
//! Concrete implementations for the DHA verification backend: MySQL
//! persistence of sessions, documents, and verification records, and
//! reqwest-based credential probes for the external LLM providers.

pub mod database;
pub mod probe;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
