//! Ollama embedding provider using the local Ollama HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// Default address of a local Ollama server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// The default embedding model.
pub const DEFAULT_MODEL: &str = "nomic-embed-text";

/// The dimensionality of `nomic-embed-text` embeddings.
pub const DEFAULT_DIMENSIONS: usize = 768;

/// Default per-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// An [`EmbeddingProvider`] backed by Ollama's `/api/embed` endpoint.
///
/// Uses `reqwest` to talk to a local (or remote) Ollama server. Batches are
/// sent in a single request and come back in input order.
///
/// # Configuration
///
/// - `base_url` - defaults to `http://localhost:11434`.
/// - `model` - defaults to `nomic-embed-text`.
/// - `dimensions` - defaults to 768, matching the default model.
/// - `timeout` - per-request deadline, 30 seconds by default.
///
/// # Example
///
/// ```rust,ignore
/// use finwise_rag::OllamaEmbeddingProvider;
///
/// let provider = OllamaEmbeddingProvider::new();
/// let embedding = provider.embed("What is an emergency fund?").await?;
/// ```
pub struct OllamaEmbeddingProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimensions: usize,
    timeout: Duration,
}

impl OllamaEmbeddingProvider {
    /// Create a provider pointing at the default local server.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            dimensions: DEFAULT_DIMENSIONS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create a provider from the `OLLAMA_URL` and `FINWISE_EMBED_MODEL`
    /// environment variables, falling back to the defaults for any that are
    /// unset.
    pub fn from_env() -> Self {
        let mut provider = Self::new();
        if let Ok(url) = std::env::var("OLLAMA_URL") {
            provider.base_url = url;
        }
        if let Ok(model) = std::env::var("FINWISE_EMBED_MODEL") {
            provider.model = model;
        }
        provider
    }

    /// Set the server base URL, e.g. `http://ollama.internal:11434`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the expected embedding dimensionality.
    ///
    /// Must match the configured model; responses with any other width are
    /// rejected with a dimension mismatch.
    pub fn with_dimensions(mut self, dims: usize) -> Self {
        self.dimensions = dims;
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Classify a transport failure as a timeout or an availability error.
    fn request_error(&self, e: reqwest::Error) -> RagError {
        if e.is_timeout() {
            RagError::EmbeddingTimeout {
                provider: "Ollama".into(),
                seconds: self.timeout.as_secs(),
            }
        } else {
            RagError::EmbeddingUnavailable {
                provider: "Ollama".into(),
                message: format!("request failed: {e}"),
            }
        }
    }
}

impl Default for OllamaEmbeddingProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── Ollama API request/response types ──────────────────────────────

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

// ── EmbeddingProvider implementation ───────────────────────────────

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(provider = "Ollama", text_len = text.len(), "embedding single text");

        let results = self.embed_batch(&[text]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| RagError::EmbeddingUnavailable {
                provider: "Ollama".into(),
                message: "API returned empty response".into(),
            })
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(
            provider = "Ollama",
            batch_size = texts.len(),
            model = %self.model,
            "embedding batch"
        );

        let request_body = EmbedRequest {
            model: &self.model,
            input: texts.to_vec(),
        };

        let response = self
            .client
            .post(format!("{}/api/embed", self.base_url))
            .timeout(self.timeout)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Ollama", error = %e, "request failed");
                self.request_error(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);

            error!(provider = "Ollama", %status, "API error");
            return Err(RagError::EmbeddingUnavailable {
                provider: "Ollama".into(),
                message: format!("API returned {status}: {detail}"),
            });
        }

        let embed_response: EmbedResponse = response.json().await.map_err(|e| {
            error!(provider = "Ollama", error = %e, "failed to parse response");
            RagError::EmbeddingUnavailable {
                provider: "Ollama".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        if embed_response.embeddings.len() != texts.len() {
            return Err(RagError::EmbeddingUnavailable {
                provider: "Ollama".into(),
                message: format!(
                    "API returned {} embeddings for {} inputs",
                    embed_response.embeddings.len(),
                    texts.len()
                ),
            });
        }

        for embedding in &embed_response.embeddings {
            if embedding.len() != self.dimensions {
                return Err(RagError::DimensionMismatch {
                    expected: self.dimensions,
                    actual: embedding.len(),
                });
            }
        }

        Ok(embed_response.embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
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
