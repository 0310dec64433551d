//! Credential probes for external LLM providers.

pub mod http_probe;

pub use http_probe::{AnthropicProbe, OpenAiProbe};
