//! Deterministic embedding provider for tests and examples.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// An [`EmbeddingProvider`] that derives vectors from a hash of the input.
///
/// Equal texts always map to equal vectors, and every vector is
/// L2-normalized, so the cosine similarity of a text with itself is 1.0.
/// That makes retrieval outcomes fully predictable without a model server.
///
/// Failure injection is supported for exercising error paths: a provider
/// built with [`fail_after(n)`](Self::fail_after) serves the first `n`
/// `embed` calls and fails every call after that.
pub struct MockEmbeddingProvider {
    dimension: usize,
    fail_after: Option<usize>,
    calls: AtomicUsize,
}

impl MockEmbeddingProvider {
    /// Create a provider emitting vectors of `dimension` components.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            fail_after: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Make every `embed` call after the first `calls` fail.
    pub fn fail_after(mut self, calls: usize) -> Self {
        self.fail_after = Some(calls);
        self
    }

    /// Number of `embed` calls served so far, including failed ones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Derive the embedding for a text: FNV-1a over the bytes seeds a
    /// per-component mix, then the vector is L2-normalized.
    fn embedding_for(&self, text: &str) -> Vec<f32> {
        let mut state: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in text.bytes() {
            state ^= u64::from(byte);
            state = state.wrapping_mul(0x100_0000_01b3);
        }

        let mut components = Vec::with_capacity(self.dimension);
        for i in 0..self.dimension as u64 {
            let seeded = state.wrapping_add(i).wrapping_mul(0x2545_F491_4F6C_DD1D);
            let unit = (seeded >> 11) as f64 / (1u64 << 53) as f64;
            components.push((unit * 2.0 - 1.0) as f32);
        }

        let norm: f32 = components.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for component in &mut components {
                *component /= norm;
            }
        }
        components
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let seen = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(limit) = self.fail_after {
            if seen >= limit {
                return Err(RagError::EmbeddingUnavailable {
                    provider: "Mock".into(),
                    message: "injected failure".into(),
                });
            }
        }
        Ok(self.embedding_for(text))
    }

    fn dimensions(&self) -> usize {
        self.dimension
    }
}
