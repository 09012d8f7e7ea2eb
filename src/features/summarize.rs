//! Chunked hierarchical summarization with retry and backoff.

use tracing::{error, info, warn};

use crate::ai::client::{GenerationRequest, TextGenerator};
use crate::ai::extract::extract_text;
use crate::ai::retry::{AttemptState, RetryPolicy, classify_error};
use crate::chunker::chunk_text;
use crate::errors::SummaryError;
use crate::prompt::{
    build_analysis_prompt, build_merge_input, build_reflection_prompt, build_summary_prompt,
    label_partial_summary,
};

pub const SUMMARY_TEMPERATURE: f64 = 0.2;
pub const REFLECTION_TEMPERATURE: f64 = 0.3;
pub const REFLECTION_MAX_TOKENS: u32 = 1200;
pub const ANALYSIS_TEMPERATURE: f64 = 0.25;
pub const ANALYSIS_MAX_TOKENS: u32 = 800;

/// Summarizes documents through a [`TextGenerator`], retrying failed calls.
///
/// Calls are made one at a time. Each retrying call starts on the primary
/// model; the switch to the fallback model is local to that call.
pub struct Summarizer<G> {
    generator: G,
    model: String,
    fallback_model: Option<String>,
    policy: RetryPolicy,
}

impl<G: TextGenerator> Summarizer<G> {
    pub fn new(generator: G, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
            fallback_model: None,
            policy: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_fallback_model(mut self, fallback_model: Option<String>) -> Self {
        self.fallback_model = fallback_model.filter(|m| !m.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Summarize one chunk of text.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::ExhaustedRetries`] when every attempt failed.
    pub async fn summarize_chunk(
        &self,
        text: &str,
        max_output_tokens: u32,
    ) -> Result<String, SummaryError> {
        self.generate_with_retry(
            build_summary_prompt(text),
            SUMMARY_TEMPERATURE,
            max_output_tokens,
        )
        .await
    }

    /// Summarize a document of any length.
    ///
    /// A document that fits in one chunk is summarized directly. Longer
    /// documents are summarized chunk by chunk, and the labelled partial
    /// summaries are merged by one more call.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::EmptyDocument`] when the document has no
    /// non-whitespace text, or the first [`SummaryError::ExhaustedRetries`]
    /// hit by any chunk or by the merge pass.
    pub async fn summarize_hierarchical(
        &self,
        document: &str,
        chunk_chars: usize,
        per_chunk_max_tokens: u32,
        final_max_tokens: u32,
    ) -> Result<String, SummaryError> {
        let chunks = chunk_text(document, chunk_chars);
        info!("Split document into {} chunk(s)", chunks.len());

        match chunks.as_slice() {
            [] => Err(SummaryError::EmptyDocument),
            [only] => self.summarize_chunk(only, per_chunk_max_tokens).await,
            _ => {
                let total = chunks.len();
                let mut partials = Vec::with_capacity(total);

                for (index, chunk) in chunks.iter().enumerate() {
                    let ordinal = index + 1;
                    info!(
                        "Summarizing chunk {}/{} ({} characters)",
                        ordinal,
                        total,
                        chunk.chars().count()
                    );
                    let summary = self.summarize_chunk(chunk, per_chunk_max_tokens).await?;
                    partials.push(label_partial_summary(ordinal, &summary));
                }

                info!("Merging {} partial summaries", partials.len());
                let merged = build_merge_input(&partials);
                self.summarize_chunk(&merged, final_max_tokens).await
            }
        }
    }

    /// Empathetic reflection on a single transcribed recording.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::ExhaustedRetries`] when every attempt failed.
    pub async fn reflect(&self, transcript: &str) -> Result<String, SummaryError> {
        self.generate_with_retry(
            build_reflection_prompt(transcript),
            REFLECTION_TEMPERATURE,
            REFLECTION_MAX_TOKENS,
        )
        .await
    }

    /// Bullet-point analysis of an existing summary, addressed to the speaker.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::ExhaustedRetries`] when every attempt failed.
    pub async fn analyze(&self, summary: &str) -> Result<String, SummaryError> {
        self.generate_with_retry(
            build_analysis_prompt(summary),
            ANALYSIS_TEMPERATURE,
            ANALYSIS_MAX_TOKENS,
        )
        .await
    }

    async fn generate_with_retry(
        &self,
        prompt: String,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<String, SummaryError> {
        let mut state = AttemptState::first(&self.model);

        loop {
            let request = GenerationRequest {
                model: state.model().to_string(),
                prompt: prompt.clone(),
                temperature,
                max_tokens,
            };

            let err = match self.generator.generate(&request).await {
                Ok(response) => return Ok(extract_text(&response)),
                Err(err) => err,
            };

            if state.is_last(&self.policy) {
                error!(
                    "Generation failed on attempt {}/{}, giving up: {}",
                    state.attempt(),
                    self.policy.max_attempts,
                    err
                );
                return Err(SummaryError::ExhaustedRetries {
                    attempts: state.attempt(),
                    last_error: err,
                });
            }

            let kind = classify_error(&err.to_string());
            // ThreadRng is not Send; keep it out of the await below.
            let delay = {
                let mut rng = rand::thread_rng();
                self.policy.delay_for(kind, state.attempt(), &mut rng)
            };
            warn!(
                "Generation failed on attempt {}/{} ({:?}): {}. Retrying in {}s",
                state.attempt(),
                self.policy.max_attempts,
                kind,
                err,
                delay.as_secs()
            );
            tokio::time::sleep(delay).await;

            let was_on_fallback = state.on_fallback();
            state = state.after_failure(&self.policy, self.fallback_model.as_deref());
            if state.on_fallback() && !was_on_fallback {
                info!("Switching to fallback model {}", state.model());
            }
        }
    }
}
