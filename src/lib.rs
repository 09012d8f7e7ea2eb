//! NotePsyche - summaries and reflections for a personal audio journal.
//!
//! Voice notes are transcribed, combined into one document, and summarized by a
//! hosted language model. Long documents go through a chunked, hierarchical
//! pass: every chunk is summarized on its own and the partial summaries are
//! merged by one final call. Every model call retries with backoff, and can
//! move to a fallback model after repeated failures.
//!
//! # Architecture
//!
//! The crate uses:
//! - reqwest for the OpenAI-compatible chat-completions API (Groq by default)
//! - openai-api-rs message types for building prompts
//! - Tokio for async runtime, file I/O and backoff sleeps
//! - tracing for structured logs
//!
//! # Example
//!
//! ```no_run
//! use notepsyche::ai::LlmClient;
//! use notepsyche::core::config::AppConfig;
//! use notepsyche::features::summarize::Summarizer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     notepsyche::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let summarizer = Summarizer::new(LlmClient::from_config(&config), config.model.clone())
//!         .with_fallback_model(config.fallback_model.clone());
//!
//!     let summary = summarizer
//!         .summarize_hierarchical("Today I felt calmer than yesterday.", 15_000, 800, 900)
//!         .await?;
//!     println!("{summary}");
//!
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod ai;
pub mod chunker;
pub mod core;
pub mod errors;
pub mod features;
pub mod prompt;

pub use errors::{GenerationError, SummaryError};
pub use features::summarize::Summarizer;

/// Configure structured logging with JSON format.
///
/// Sets up tracing-subscriber with a JSON formatter that includes event
/// targets. Call it once at program start.
///
/// # Example
///
/// ```
/// notepsyche::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
