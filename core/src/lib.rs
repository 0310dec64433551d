//! # DHA Core
//!
//! Core business logic and domain layer for the DHA Digital Services
//! Platform. This crate contains the domain entities, validation rules,
//! repository interfaces, verification services, and error types behind
//! document verification.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod validation;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
