//! Vector index trait for storing and searching embedded chunks.

use async_trait::async_trait;

use crate::document::{DocumentChunk, ScoredChunk, SearchFilter};
use crate::error::Result;

/// A storage backend for embedded chunks with similarity search.
///
/// Implementations manage named collections of [`DocumentChunk`]s and
/// support upserting, similarity search with optional metadata filtering,
/// and wiping a collection.
///
/// # Example
///
/// ```rust,ignore
/// use finwise_rag::{InMemoryVectorIndex, VectorIndex};
///
/// let index = InMemoryVectorIndex::new(768);
/// index.upsert("docs", &chunks).await?;
/// let results = index.search("docs", &query_embedding, 3, None).await?;
/// ```
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Upsert chunks into a collection, creating it on first use.
    ///
    /// Chunks must carry embeddings of the index dimension. A chunk whose
    /// id is already present replaces the stored copy.
    async fn upsert(&self, collection: &str, chunks: &[DocumentChunk]) -> Result<()>;

    /// Search for the `k` chunks most similar to the query embedding.
    ///
    /// Results are ordered by descending cosine similarity; chunks with
    /// equal scores keep their insertion order. When `filter` is set, only
    /// chunks matching it are considered. An unknown collection and `k` of
    /// zero both produce an empty result.
    async fn search(
        &self,
        collection: &str,
        query: &[f32],
        k: usize,
        filter: Option<&SearchFilter>,
    ) -> Result<Vec<ScoredChunk>>;

    /// Remove every chunk from a collection. Clearing an unknown or already
    /// empty collection is a no-op.
    async fn clear(&self, collection: &str) -> Result<()>;

    /// Number of chunks stored in a collection. Unknown collections count
    /// as zero.
    async fn count(&self, collection: &str) -> Result<usize>;
}
