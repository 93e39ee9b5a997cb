//! # finwise-rag
//!
//! Retrieval pipeline for FinWise assistants: text chunking, embeddings,
//! and vector search.
//!
//! ## Overview
//!
//! This crate provides the pieces of a retrieval-augmented generation
//! backend and a pipeline that wires them together:
//!
//! - [`TextChunker`] - character-window chunking with overlap and natural
//!   boundary snapping
//! - [`EmbeddingProvider`] - async embedding trait, with [`OllamaEmbeddingProvider`]
//!   and a deterministic [`MockEmbeddingProvider`]
//! - [`VectorIndex`] - cosine-similarity search trait, with [`InMemoryVectorIndex`]
//! - [`RagPipeline`] - ingest (chunk, embed, store) and retrieve (embed,
//!   search) over one collection
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use finwise_rag::{InMemoryVectorIndex, MockEmbeddingProvider, RagConfig, RagPipeline};
//!
//! # async fn run() -> finwise_rag::Result<()> {
//! let config = RagConfig::default();
//! let pipeline = RagPipeline::builder()
//!     .config(config.clone())
//!     .embedder(Arc::new(MockEmbeddingProvider::new(config.dimension)))
//!     .index(Arc::new(InMemoryVectorIndex::new(config.dimension)))
//!     .build()?;
//!
//! let results = pipeline.retrieve("How much should I save each month?", None).await?;
//! # Ok(())
//! # }
//! ```

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod index;
pub mod memory;
pub mod mock;
pub mod ollama;
pub mod pipeline;

pub use chunking::{Chunker, TextChunker};
pub use config::{RagConfig, RagConfigBuilder};
pub use document::{
    DocumentChunk, DocumentMeta, ExtractedDocument, IngestReport, IngestSummary, ScoredChunk,
    SearchFilter,
};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use index::VectorIndex;
pub use memory::InMemoryVectorIndex;
pub use mock::MockEmbeddingProvider;
pub use ollama::OllamaEmbeddingProvider;
pub use pipeline::{RagPipeline, RagPipelineBuilder};
