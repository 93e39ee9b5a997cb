//! Error types for the `finwise-rag` crate.

use thiserror::Error;

/// Errors that can occur during retrieval operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// A caller-supplied parameter was out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A vector's length did not match the dimension the index was built with.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension the index or provider expects.
        expected: usize,
        /// Dimension of the offending vector.
        actual: usize,
    },

    /// The embedding backend rejected the request or could not be reached.
    #[error("embedding provider {provider} unavailable: {message}")]
    EmbeddingUnavailable {
        /// Provider name, e.g. "Ollama".
        provider: String,
        /// Backend error detail.
        message: String,
    },

    /// The embedding backend did not respond within the deadline.
    #[error("embedding provider {provider} timed out after {seconds}s")]
    EmbeddingTimeout {
        /// Provider name, e.g. "Ollama".
        provider: String,
        /// Configured request timeout.
        seconds: u64,
    },

    /// The vector index backend failed.
    #[error("vector index {backend} unavailable: {message}")]
    IndexUnavailable {
        /// Index backend name, e.g. "InMemory".
        backend: String,
        /// Backend error detail.
        message: String,
    },

    /// Ingestion failed for one document. The index holds no chunks from that file.
    #[error("ingestion failed for {file_name}: {message}")]
    Ingestion {
        /// File the failure belongs to.
        file_name: String,
        /// What went wrong.
        message: String,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl RagError {
    /// Whether one retry is worthwhile. Only transient backend failures qualify;
    /// validation and ingestion errors never do.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RagError::EmbeddingTimeout { .. }
                | RagError::EmbeddingUnavailable { .. }
                | RagError::IndexUnavailable { .. }
        )
    }
}

/// Convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
