//! All AI/LLM functionality

pub mod client;
pub mod extract;
pub mod retry;

// Re-export main types for convenience
pub use client::{GenerationRequest, LlmClient, TextGenerator, estimate_tokens};
pub use extract::extract_text;
pub use retry::{AttemptState, FailureKind, RetryPolicy, classify_error};
