//! Configuration for the retrieval pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Default chunk window, in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default number of characters carried over between consecutive chunks.
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Default number of chunks returned per query.
pub const DEFAULT_TOP_K: usize = 3;

/// Hard ceiling for per-call top-K overrides.
pub const DEFAULT_MAX_TOP_K: usize = 10;

/// Embedding dimension of the default model (`nomic-embed-text`).
pub const DEFAULT_DIMENSION: usize = 768;

/// Collection ingested documents land in unless configured otherwise.
pub const DEFAULT_COLLECTION: &str = "financial_literacy_docs";

/// Category stamped on ingested chunks when the caller does not set one.
pub const DEFAULT_CATEGORY: &str = "financial_literacy";

/// Tuning knobs for the retrieval pipeline.
///
/// The defaults mirror the production FinWise deployment: 1000-character
/// chunks with 200 characters of overlap, three results per query, and
/// 768-dimensional embeddings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagConfig {
    /// Maximum chunk length, in characters.
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks.
    pub chunk_overlap: usize,
    /// Results returned per query when the caller does not override.
    pub top_k: usize,
    /// Largest top-K a caller may request.
    pub max_top_k: usize,
    /// Embedding dimension every vector must match.
    pub dimension: usize,
    /// Name of the collection the pipeline reads and writes.
    pub collection: String,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            top_k: DEFAULT_TOP_K,
            max_top_k: DEFAULT_MAX_TOP_K,
            dimension: DEFAULT_DIMENSION,
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

impl RagConfig {
    /// Starts a builder seeded with the defaults.
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }
}

/// Builder for [`RagConfig`]. Validation happens in [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Sets the maximum chunk length, in characters.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunk_size = chunk_size;
        self
    }

    /// Sets the overlap carried between consecutive chunks.
    pub fn chunk_overlap(mut self, chunk_overlap: usize) -> Self {
        self.config.chunk_overlap = chunk_overlap;
        self
    }

    /// Sets the default number of results per query.
    pub fn top_k(mut self, top_k: usize) -> Self {
        self.config.top_k = top_k;
        self
    }

    /// Sets the largest top-K a caller may request.
    pub fn max_top_k(mut self, max_top_k: usize) -> Self {
        self.config.max_top_k = max_top_k;
        self
    }

    /// Sets the embedding dimension.
    pub fn dimension(mut self, dimension: usize) -> Self {
        self.config.dimension = dimension;
        self
    }

    /// Sets the collection name.
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.config.collection = collection.into();
        self
    }

    /// Validates the settings and returns the finished config.
    pub fn build(self) -> Result<RagConfig> {
        let config = self.config;
        if config.chunk_size == 0 {
            return Err(RagError::Config("chunk_size must be positive".to_string()));
        }
        if config.chunk_overlap >= config.chunk_size {
            return Err(RagError::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                config.chunk_overlap, config.chunk_size
            )));
        }
        if config.top_k == 0 {
            return Err(RagError::Config("top_k must be positive".to_string()));
        }
        if config.top_k > config.max_top_k {
            return Err(RagError::Config(format!(
                "top_k ({}) must not exceed max_top_k ({})",
                config.top_k, config.max_top_k
            )));
        }
        if config.dimension == 0 {
            return Err(RagError::Config("dimension must be positive".to_string()));
        }
        if config.collection.is_empty() {
            return Err(RagError::Config("collection must not be empty".to_string()));
        }
        Ok(config)
    }
}
