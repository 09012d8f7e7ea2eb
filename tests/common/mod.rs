#![allow(dead_code)]

use async_trait::async_trait;
use notepsyche::GenerationError;
use notepsyche::ai::{GenerationRequest, TextGenerator};
use serde_json::{Value, json};
use std::sync::Mutex;

type Responder = Box<dyn Fn(usize, &GenerationRequest) -> Result<Value, GenerationError> + Send + Sync>;

/// Generator that records every request and answers via a closure.
///
/// The closure receives the 0-based call index and the request.
pub struct ScriptedGenerator {
    responder: Responder,
    calls: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(usize, &GenerationRequest) -> Result<Value, GenerationError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always succeeds, answering call `i` with `"summary i"`.
    pub fn numbered() -> Self {
        Self::new(|i, _| Ok(completion(&format!("summary {i}"))))
    }

    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Value, GenerationError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(request.clone());
            calls.len() - 1
        };
        (self.responder)(index, request)
    }
}

pub fn completion(text: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }]
    })
}

pub fn server_error() -> GenerationError {
    GenerationError::Api {
        status: 500,
        body: "internal error".to_string(),
    }
}

pub fn rate_limited() -> GenerationError {
    GenerationError::Api {
        status: 429,
        body: "Rate limit reached for model".to_string(),
    }
}
