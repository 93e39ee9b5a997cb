//! Error types for the `finwise-chat` crate.

use thiserror::Error;

/// Errors that can occur while answering a chat request.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Retrieval failed. An empty index is not an error; this is the
    /// embedder or the vector index actually failing.
    #[error(transparent)]
    Rag(#[from] finwise_rag::RagError),

    /// The language model failed or timed out.
    #[error(transparent)]
    Model(#[from] finwise_model::ModelError),

    /// Invalid service configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Convenience result type for chat operations.
pub type Result<T> = std::result::Result<T, ChatError>;
