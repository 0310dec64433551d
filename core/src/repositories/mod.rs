//! Repository interfaces for persisted verification state.

pub mod session;
pub mod verification;

pub use session::{MockSessionRepository, SessionRepository};
pub use verification::{MockVerificationRepository, VerificationRepository};
