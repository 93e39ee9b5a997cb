//! In-memory vector index using cosine similarity.
//!
//! This module provides [`InMemoryVectorIndex`], a zero-dependency index
//! backed by per-collection `Vec`s protected by a `tokio::sync::RwLock`. It
//! is suitable for development, testing, and small deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{DocumentChunk, ScoredChunk, SearchFilter};
use crate::error::{RagError, Result};
use crate::index::VectorIndex;

/// Chunks in insertion order plus an id lookup for in-place replacement.
#[derive(Debug, Default)]
struct Collection {
    entries: Vec<DocumentChunk>,
    slot_by_id: HashMap<String, usize>,
}

/// An in-memory vector index using cosine similarity for search.
///
/// Every stored and queried vector must match the dimension the index was
/// created with. Collections keep chunks in insertion order, which is also
/// the tie-break order for equal similarity scores. All operations are
/// async-safe via `tokio::sync::RwLock`.
///
/// # Example
///
/// ```rust,ignore
/// use finwise_rag::{InMemoryVectorIndex, VectorIndex};
///
/// let index = InMemoryVectorIndex::new(768);
/// index.upsert("docs", &chunks).await?;
/// ```
#[derive(Debug)]
pub struct InMemoryVectorIndex {
    dimension: usize,
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryVectorIndex {
    /// Create an empty index that accepts vectors of `dimension` components.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            collections: RwLock::new(HashMap::new()),
        }
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns the dot product over the product of the L2 norms, or 0.0 if
/// either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn upsert(&self, collection: &str, chunks: &[DocumentChunk]) -> Result<()> {
        // Reject the whole batch before touching the collection.
        for chunk in chunks {
            if chunk.embedding.len() != self.dimension {
                return Err(RagError::DimensionMismatch {
                    expected: self.dimension,
                    actual: chunk.embedding.len(),
                });
            }
        }

        let mut collections = self.collections.write().await;
        let store = collections.entry(collection.to_string()).or_default();
        for chunk in chunks {
            match store.slot_by_id.get(&chunk.id) {
                Some(&slot) => store.entries[slot] = chunk.clone(),
                None => {
                    store.slot_by_id.insert(chunk.id.clone(), store.entries.len());
                    store.entries.push(chunk.clone());
                }
            }
        }
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        query: &[f32],
        k: usize,
        filter: Option<&SearchFilter>,
    ) -> Result<Vec<ScoredChunk>> {
        if query.len() != self.dimension {
            return Err(RagError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let collections = self.collections.read().await;
        let store = match collections.get(collection) {
            Some(store) => store,
            None => return Ok(Vec::new()),
        };

        let mut scored: Vec<ScoredChunk> = store
            .entries
            .iter()
            .filter(|chunk| filter.map_or(true, |f| f.matches(chunk)))
            .map(|chunk| ScoredChunk {
                chunk: chunk.clone(),
                score: cosine_similarity(&chunk.embedding, query),
            })
            .collect();

        // Stable sort keeps insertion order between equal scores.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }

    async fn clear(&self, collection: &str) -> Result<()> {
        let mut collections = self.collections.write().await;
        if let Some(store) = collections.get_mut(collection) {
            store.entries.clear();
            store.slot_by_id.clear();
        }
        Ok(())
    }

    async fn count(&self, collection: &str) -> Result<usize> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).map_or(0, |store| store.entries.len()))
    }
}
