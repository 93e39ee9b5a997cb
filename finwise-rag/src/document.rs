//! Document, chunk, and search result types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_CATEGORY;

/// One embedded slice of an uploaded document, as stored in the vector index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunk {
    /// Unique chunk id (UUID v4).
    pub id: String,
    /// Chunk text, verbatim from the source document.
    pub text: String,
    /// Source file name, e.g. "budgeting_basics.pdf".
    pub file_name: String,
    /// Source file type, e.g. "pdf" or "txt".
    pub file_type: String,
    /// Who uploaded the document.
    pub uploader_id: String,
    /// Zero-based position of this chunk within its document.
    pub chunk_index: usize,
    /// Number of chunks the document was split into.
    pub total_chunks: usize,
    /// Topic category used for filtered search.
    pub category: String,
    /// When the document was ingested.
    pub upload_timestamp: DateTime<Utc>,
    /// Embedding vector for this chunk.
    pub embedding: Vec<f32>,
}

/// Descriptive metadata for a document about to be ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub file_name: String,
    pub file_type: String,
    pub uploader_id: String,
    pub category: String,
}

impl DocumentMeta {
    /// Creates metadata with the default category.
    pub fn new(
        file_name: impl Into<String>,
        file_type: impl Into<String>,
        uploader_id: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            file_type: file_type.into(),
            uploader_id: uploader_id.into(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }

    /// Replaces the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// Plain text pulled out of an uploaded file, paired with its metadata.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub text: String,
    pub meta: DocumentMeta,
}

impl ExtractedDocument {
    pub fn new(text: impl Into<String>, meta: DocumentMeta) -> Self {
        Self {
            text: text.into(),
            meta,
        }
    }
}

/// A chunk returned from similarity search, with its cosine score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: DocumentChunk,
    /// Cosine similarity against the query, in [-1.0, 1.0].
    pub score: f32,
}

/// Optional metadata constraints applied before similarity ranking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    /// Keep only chunks in this category.
    pub category: Option<String>,
    /// Keep only chunks uploaded by this user.
    pub uploader_id: Option<String>,
}

impl SearchFilter {
    /// Restricts results to one category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restricts results to one uploader.
    pub fn uploader(mut self, uploader_id: impl Into<String>) -> Self {
        self.uploader_id = Some(uploader_id.into());
        self
    }

    /// Whether a chunk satisfies every set constraint. Unset fields match
    /// everything.
    pub fn matches(&self, chunk: &DocumentChunk) -> bool {
        self.category
            .as_ref()
            .map_or(true, |category| *category == chunk.category)
            && self
                .uploader_id
                .as_ref()
                .map_or(true, |uploader| *uploader == chunk.uploader_id)
    }
}

/// Outcome of ingesting a single document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestReport {
    pub file_name: String,
    /// How many chunks were written to the index.
    pub chunk_count: usize,
}

/// Roll-up of a multi-document ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestSummary {
    /// Documents that were ingested completely.
    pub documents_processed: usize,
    /// Chunks written across all successful documents.
    pub total_chunks: usize,
    /// `(file_name, reason)` for every document that failed.
    pub failures: Vec<(String, String)>,
}
