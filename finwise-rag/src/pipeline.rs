//! Retrieval pipeline orchestrator.
//!
//! The [`RagPipeline`] coordinates the full ingest-and-retrieve workflow by
//! composing a [`Chunker`], an [`EmbeddingProvider`], and a [`VectorIndex`]
//! over a single named collection.
//!
//! # Example
//!
//! ```rust,ignore
//! use finwise_rag::{InMemoryVectorIndex, RagConfig, RagPipeline};
//!
//! let config = RagConfig::default();
//! let pipeline = RagPipeline::builder()
//!     .config(config.clone())
//!     .embedder(Arc::new(my_embedder))
//!     .index(Arc::new(InMemoryVectorIndex::new(config.dimension)))
//!     .build()?;
//!
//! pipeline.ingest(&text, &meta).await?;
//! let results = pipeline.retrieve("How do I start budgeting?", None).await?;
//! ```

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::chunking::{Chunker, TextChunker};
use crate::config::RagConfig;
use crate::document::{
    DocumentChunk, DocumentMeta, ExtractedDocument, IngestReport, IngestSummary, ScoredChunk,
    SearchFilter,
};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::index::VectorIndex;

/// The retrieval pipeline orchestrator.
///
/// Coordinates document ingestion (chunk, embed, store) and retrieval
/// (embed, search) against one collection. Construct one via
/// [`RagPipeline::builder()`].
pub struct RagPipeline {
    config: RagConfig,
    chunker: Arc<dyn Chunker>,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
}

impl std::fmt::Debug for RagPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagPipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RagPipeline {
    /// Create a new [`RagPipelineBuilder`].
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Return a reference to the embedding provider.
    pub fn embedder(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.embedder
    }

    /// Return a reference to the vector index.
    pub fn index(&self) -> &Arc<dyn VectorIndex> {
        &self.index
    }

    /// Ingest one document: chunk, embed, then store.
    ///
    /// Either every chunk of the document lands in the index or none does.
    /// A document whose text produces no chunks is reported with a chunk
    /// count of zero and the index is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Ingestion`] if embedding or storage fails. The
    /// index holds nothing from this document in that case.
    pub async fn ingest(&self, text: &str, meta: &DocumentMeta) -> Result<IngestReport> {
        // 1. Chunk the document
        let chunk_texts = self.chunker.chunk(text);
        if chunk_texts.is_empty() {
            info!(file = %meta.file_name, chunk_count = 0, "ingested document (empty)");
            return Ok(IngestReport {
                file_name: meta.file_name.clone(),
                chunk_count: 0,
            });
        }

        // 2. Stage every embedding before touching the index, so a failure
        //    mid-batch leaves no partial state for this file
        let texts: Vec<&str> = chunk_texts.iter().map(|t| t.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await.map_err(|e| {
            error!(file = %meta.file_name, error = %e, "embedding failed during ingestion");
            RagError::Ingestion {
                file_name: meta.file_name.clone(),
                message: format!("embedding failed: {e}"),
            }
        })?;

        if embeddings.len() != chunk_texts.len() {
            return Err(RagError::Ingestion {
                file_name: meta.file_name.clone(),
                message: format!(
                    "embedder returned {} vectors for {} chunks",
                    embeddings.len(),
                    chunk_texts.len()
                ),
            });
        }

        // 3. Assemble the chunk records
        let total_chunks = chunk_texts.len();
        let now = Utc::now();
        let chunks: Vec<DocumentChunk> = chunk_texts
            .into_iter()
            .zip(embeddings)
            .enumerate()
            .map(|(chunk_index, (text, embedding))| DocumentChunk {
                id: Uuid::new_v4().to_string(),
                text,
                file_name: meta.file_name.clone(),
                file_type: meta.file_type.clone(),
                uploader_id: meta.uploader_id.clone(),
                chunk_index,
                total_chunks,
                category: meta.category.clone(),
                upload_timestamp: now,
                embedding,
            })
            .collect();

        // 4. Upsert the whole batch in one call
        self.index.upsert(&self.config.collection, &chunks).await.map_err(|e| {
            error!(file = %meta.file_name, error = %e, "upsert failed during ingestion");
            RagError::Ingestion {
                file_name: meta.file_name.clone(),
                message: format!("upsert failed: {e}"),
            }
        })?;

        info!(file = %meta.file_name, chunk_count = total_chunks, "ingested document");
        Ok(IngestReport {
            file_name: meta.file_name.clone(),
            chunk_count: total_chunks,
        })
    }

    /// Ingest several documents, isolating failures per document.
    ///
    /// A document that fails is recorded in the summary and skipped; the
    /// remaining documents are still ingested.
    pub async fn ingest_many(&self, documents: &[ExtractedDocument]) -> IngestSummary {
        let mut summary = IngestSummary::default();
        for document in documents {
            match self.ingest(&document.text, &document.meta).await {
                Ok(report) => {
                    summary.documents_processed += 1;
                    summary.total_chunks += report.chunk_count;
                }
                Err(e) => {
                    warn!(file = %document.meta.file_name, error = %e, "skipping document");
                    summary.failures.push((document.meta.file_name.clone(), e.to_string()));
                }
            }
        }

        info!(
            documents = summary.documents_processed,
            chunks = summary.total_chunks,
            failures = summary.failures.len(),
            "ingestion run complete"
        );
        summary
    }

    /// Retrieve the chunks most similar to a query.
    ///
    /// `k` overrides the configured top-K for this call; `None` uses the
    /// default. Failures from the embedder or the index are returned as-is,
    /// never converted into an empty result.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidParameter`] if `k` is zero or larger than
    /// the configured maximum, or the underlying error if embedding or
    /// search fails twice.
    pub async fn retrieve(&self, query: &str, k: Option<usize>) -> Result<Vec<ScoredChunk>> {
        self.retrieve_filtered(query, k, None).await
    }

    /// Like [`retrieve`](Self::retrieve), with a metadata pre-filter.
    ///
    /// Retrieval is a read with no side effects, so a transient embedder or
    /// index failure is retried exactly once before the error is returned.
    pub async fn retrieve_filtered(
        &self,
        query: &str,
        k: Option<usize>,
        filter: Option<&SearchFilter>,
    ) -> Result<Vec<ScoredChunk>> {
        let k = match k {
            None => self.config.top_k,
            Some(k) if k >= 1 && k <= self.config.max_top_k => k,
            Some(k) => {
                return Err(RagError::InvalidParameter(format!(
                    "top-K override {k} outside [1, {}]",
                    self.config.max_top_k
                )));
            }
        };

        let query_embedding = match self.embedder.embed(query).await {
            Ok(embedding) => embedding,
            Err(e) if e.is_retryable() => {
                warn!(error = %e, "query embedding failed, retrying once");
                self.embedder.embed(query).await?
            }
            Err(e) => return Err(e),
        };

        let results = match self
            .index
            .search(&self.config.collection, &query_embedding, k, filter)
            .await
        {
            Ok(results) => results,
            Err(e) if e.is_retryable() => {
                warn!(error = %e, "index search failed, retrying once");
                self.index
                    .search(&self.config.collection, &query_embedding, k, filter)
                    .await?
            }
            Err(e) => return Err(e),
        };

        info!(k, result_count = results.len(), "retrieval completed");
        Ok(results)
    }

    /// Remove every chunk from the pipeline's collection.
    pub async fn clear(&self) -> Result<()> {
        self.index.clear(&self.config.collection).await?;
        info!(collection = %self.config.collection, "cleared index");
        Ok(())
    }

    /// Number of chunks currently stored in the pipeline's collection.
    pub async fn count(&self) -> Result<usize> {
        self.index.count(&self.config.collection).await
    }
}

/// Builder for constructing a [`RagPipeline`].
///
/// `embedder` and `index` are required; `config` falls back to
/// [`RagConfig::default()`] and `chunker` to a [`TextChunker`] built from
/// the config. Call [`build()`](RagPipelineBuilder::build) to validate and
/// produce the pipeline.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = RagPipeline::builder()
///     .embedder(Arc::new(embedder))
///     .index(Arc::new(index))
///     .build()?;
/// ```
#[derive(Default)]
pub struct RagPipelineBuilder {
    config: Option<RagConfig>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    index: Option<Arc<dyn VectorIndex>>,
    chunker: Option<Arc<dyn Chunker>>,
}

impl RagPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the vector index backend.
    pub fn index(mut self, index: Arc<dyn VectorIndex>) -> Self {
        self.index = Some(index);
        self
    }

    /// Replace the default chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Build the [`RagPipeline`], validating that the pieces agree.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if a required component is missing or
    /// the embedder's dimensionality does not match the configured one.
    pub fn build(self) -> Result<RagPipeline> {
        let config = self.config.unwrap_or_default();
        let embedder = self
            .embedder
            .ok_or_else(|| RagError::Config("embedder is required".to_string()))?;
        let index = self
            .index
            .ok_or_else(|| RagError::Config("index is required".to_string()))?;

        if embedder.dimensions() != config.dimension {
            return Err(RagError::Config(format!(
                "embedder produces {}-dimensional vectors but the pipeline is configured for {}",
                embedder.dimensions(),
                config.dimension
            )));
        }

        let chunker: Arc<dyn Chunker> = match self.chunker {
            Some(chunker) => chunker,
            None => Arc::new(TextChunker::new(config.chunk_size, config.chunk_overlap)?),
        };

        Ok(RagPipeline {
            config,
            chunker,
            embedder,
            index,
        })
    }
}
