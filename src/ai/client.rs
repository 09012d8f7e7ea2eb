//! Chat-completions client for the hosted language model.
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint (Groq by
//! default). The client performs exactly one request per call; retrying is
//! the summarizer's job.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::config::AppConfig;
use crate::errors::GenerationError;

const REQUEST_TIMEOUT_SECS: u64 = 300;

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    client_or_default(
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build(),
    )
});

fn client_or_default<E: std::fmt::Display>(built: Result<Client, E>) -> Client {
    built.unwrap_or_else(|e| {
        warn!("Failed to build HTTP client, using defaults without a request timeout: {}", e);
        Client::new()
    })
}

#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

/// One text-generation request: a single user prompt sent to `model`.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// The remote text-generation collaborator.
///
/// Returns the raw response body, parsed as JSON when possible and as a
/// `Value::String` otherwise; text extraction happens in [`crate::ai::extract`].
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Value, GenerationError>;
}

/// LLM API client for generating summaries
pub struct LlmClient {
    api_key: String,
    api_base: String,
}

impl LlmClient {
    #[must_use]
    pub fn new(api_key: String, api_base: String) -> Self {
        Self { api_key, api_base }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.groq_api_key.clone(), config.groq_api_base.clone())
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }

    #[must_use]
    pub fn build_messages(prompt: &str) -> Vec<ChatCompletionMessage> {
        vec![ChatCompletionMessage {
            role: MessageRole::user,
            content: Content::Text(prompt.to_string()),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        }]
    }
}

/// Build the JSON request body for a chat-completions call.
#[must_use]
pub fn build_chat_body(request: &GenerationRequest) -> Value {
    let messages: Vec<Value> = LlmClient::build_messages(&request.prompt)
        .iter()
        .map(|msg| {
            let role_str = match msg.role {
                MessageRole::system => "system",
                MessageRole::user => "user",
                MessageRole::assistant => "assistant",
                MessageRole::function => "function",
                MessageRole::tool => "tool",
            };

            let content_val = match &msg.content {
                Content::Text(text) => json!(text),
                Content::ImageUrl(_) => json!(""),
            };

            json!({
                "role": role_str,
                "content": content_val
            })
        })
        .collect();

    json!({
        "model": request.model,
        "messages": messages,
        "temperature": request.temperature,
        "max_tokens": request.max_tokens
    })
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<Value, GenerationError> {
        #[cfg(feature = "debug-logs")]
        info!("Using prompt:\n{}", request.prompt);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            "Requesting completion from {} (~{} input tokens, max {} output tokens)",
            request.model,
            estimate_tokens(&request.prompt),
            request.max_tokens
        );

        let response = HTTP_CLIENT
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&build_chat_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        // A body that is not JSON is still a response; extraction renders it as text.
        let body = response.text().await?;
        let parsed: Value = serde_json::from_str(&body).unwrap_or_else(|_| {
            debug!("Completion response from {} is not JSON", request.model);
            Value::String(body)
        });

        debug!("Received completion response from {}", request.model);
        Ok(parsed)
    }
}
