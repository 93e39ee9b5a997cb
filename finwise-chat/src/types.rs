//! Request, response, and audit types for the chat service.

use chrono::{DateTime, Utc};
use finwise_rag::ScoredChunk;
use serde::{Deserialize, Serialize};

/// An incoming user question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    pub user_id: String,
}

impl ChatRequest {
    pub fn new(query: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            user_id: user_id.into(),
        }
    }
}

/// Where a piece of answer context came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    pub file_name: String,
    pub chunk_index: usize,
}

/// The answer returned to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response_text: String,
    /// How well grounded the answer is, in [0.2, 1.0].
    pub confidence: f32,
    /// Whether the answer suggests contacting a human.
    pub escalate: bool,
    /// Context chunks that made it into the prompt, best match first.
    pub sources: Vec<SourceRef>,
    pub user_id: String,
}

/// Full record of one answered question, for audit or history storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatExchange {
    pub query: String,
    /// Everything retrieval returned, before the prompt budget was applied.
    pub retrieved_chunks: Vec<ScoredChunk>,
    pub response_text: String,
    pub confidence: f32,
    pub timestamp: DateTime<Utc>,
}

/// Liveness of the service's dependencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub embedding_ok: bool,
    pub model_ok: bool,
    pub indexed_chunks: usize,
}
