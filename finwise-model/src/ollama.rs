//! Ollama chat model using the local Ollama HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{ModelError, Result};
use crate::llm::{LanguageModel, validate_params};

/// Default address of a local Ollama server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// The default chat model.
pub const DEFAULT_MODEL: &str = "phi3:mini";

/// Default per-request timeout, in seconds. Generation is much slower than
/// embedding, so the deadline is generous.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// A [`LanguageModel`] backed by Ollama's `/api/generate` endpoint.
///
/// Requests are sent non-streaming; the full completion comes back in one
/// response.
///
/// # Configuration
///
/// - `base_url` - defaults to `http://localhost:11434`.
/// - `model` - defaults to `phi3:mini`.
/// - `timeout` - per-request deadline, 120 seconds by default.
///
/// # Example
///
/// ```rust,ignore
/// use finwise_model::OllamaModel;
///
/// let model = OllamaModel::new();
/// let answer = model.complete("What is APR?", 0.2, 256).await?;
/// ```
pub struct OllamaModel {
    client: reqwest::Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OllamaModel {
    /// Create a model handle pointing at the default local server.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create a model handle from the `OLLAMA_URL` and `FINWISE_CHAT_MODEL`
    /// environment variables, falling back to the defaults for any that are
    /// unset.
    pub fn from_env() -> Self {
        let mut model = Self::new();
        if let Ok(url) = std::env::var("OLLAMA_URL") {
            model.base_url = url;
        }
        if let Ok(name) = std::env::var("FINWISE_CHAT_MODEL") {
            model.model = name;
        }
        model
    }

    /// Set the server base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the model name, e.g. `llama3.2:3b`.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Classify a transport failure as a timeout or an availability error.
    fn request_error(&self, e: reqwest::Error) -> ModelError {
        if e.is_timeout() {
            ModelError::Timeout {
                model: self.model.clone(),
                seconds: self.timeout.as_secs(),
            }
        } else {
            ModelError::Unavailable {
                model: self.model.clone(),
                message: format!("request failed: {e}"),
            }
        }
    }
}

impl Default for OllamaModel {
    fn default() -> Self {
        Self::new()
    }
}

// ── Ollama API request/response types ──────────────────────────────

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

// ── LanguageModel implementation ───────────────────────────────────

#[async_trait]
impl LanguageModel for OllamaModel {
    async fn complete(&self, prompt: &str, temperature: f32, max_tokens: u32) -> Result<String> {
        validate_params(temperature, max_tokens)?;

        debug!(
            model = %self.model,
            prompt_len = prompt.len(),
            temperature,
            max_tokens,
            "requesting completion"
        );

        let request_body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature,
                num_predict: max_tokens,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .timeout(self.timeout)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(model = %self.model, error = %e, "request failed");
                self.request_error(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);

            error!(model = %self.model, %status, "API error");
            return Err(ModelError::Unavailable {
                model: self.model.clone(),
                message: format!("API returned {status}: {detail}"),
            });
        }

        let generate_response: GenerateResponse = response.json().await.map_err(|e| {
            error!(model = %self.model, error = %e, "failed to parse response");
            ModelError::Unavailable {
                model: self.model.clone(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        if generate_response.response.trim().is_empty() {
            return Err(ModelError::Unavailable {
                model: self.model.clone(),
                message: "model returned an empty completion".to_string(),
            });
        }

        Ok(generate_response.response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn health_check(&self) -> bool {
        self.client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(self.timeout)
            .send()
            .await
            .map(|response| response.status().is_success())
            .unwrap_or(false)
    }
}
