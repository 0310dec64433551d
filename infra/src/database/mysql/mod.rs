//! MySQL repository implementations.

pub mod session_repository_impl;
pub mod verification_repository_impl;

pub use session_repository_impl::MySqlSessionRepository;
pub use verification_repository_impl::MySqlVerificationRepository;
