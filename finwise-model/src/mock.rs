//! Scriptable language model for tests and examples.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{ModelError, Result};
use crate::llm::{LanguageModel, validate_params};

/// A [`LanguageModel`] that answers from a script instead of a server.
///
/// By default it echoes a summary of the prompt it received. A fixed
/// response or an injected failure can be configured instead, and the mock
/// records its call count and the last prompt for assertions.
pub struct MockModel {
    response: Option<String>,
    fail: bool,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl MockModel {
    /// Create a mock that echoes a summary of each prompt.
    pub fn new() -> Self {
        Self {
            response: None,
            fail: false,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Create a mock that always returns `response`.
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
            ..Self::new()
        }
    }

    /// Create a mock whose every completion fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Number of `complete` calls received, including failed ones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The prompt passed to the most recent `complete` call.
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

impl Default for MockModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    async fn complete(&self, prompt: &str, temperature: f32, max_tokens: u32) -> Result<String> {
        validate_params(temperature, max_tokens)?;

        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());

        if self.fail {
            return Err(ModelError::Unavailable {
                model: "mock".into(),
                message: "injected failure".into(),
            });
        }

        match &self.response {
            Some(response) => Ok(response.clone()),
            None => Ok(format!("Answered from {} characters of prompt.", prompt.len())),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
