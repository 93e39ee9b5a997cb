//! Text chunking.
//!
//! This module provides the [`Chunker`] trait and [`TextChunker`], which
//! splits text into fixed-size character windows with configurable overlap,
//! preferring to end each window at a paragraph or sentence boundary when
//! one falls late enough in the window.

use crate::error::{RagError, Result};

/// A strategy for splitting raw document text into chunks.
///
/// Implementations return plain chunk texts. Embeddings and per-chunk
/// metadata are attached later by the pipeline.
pub trait Chunker: Send + Sync {
    /// Split text into chunks.
    ///
    /// Returns an empty `Vec` for empty input. Text no longer than the
    /// configured chunk size comes back as a single chunk.
    fn chunk(&self, text: &str) -> Vec<String>;
}

/// Chunk boundaries tried in order, best first. A boundary is included at
/// the end of the chunk it closes.
const BREAKS: [&[char]; 5] = [
    &['\n', '\n'],
    &['\n'],
    &['.', ' '],
    &['!', ' '],
    &['?', ' '],
];

/// Splits text into chunks of at most `chunk_size` characters, where each
/// chunk after the first repeats the last `chunk_overlap` characters of its
/// predecessor.
///
/// Windows are measured in characters, never bytes, so multi-byte text is
/// never split inside a code point. When a window does not reach the end of
/// the text, the chunker scans the last quarter of the window for a natural
/// boundary and cuts there instead of mid-word.
///
/// # Example
///
/// ```rust,ignore
/// use finwise_rag::TextChunker;
///
/// let chunker = TextChunker::new(1000, 200)?;
/// let chunks = chunker.chunk(&text);
/// ```
#[derive(Debug, Clone)]
pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextChunker {
    /// Create a new `TextChunker`.
    ///
    /// # Arguments
    ///
    /// * `chunk_size` - maximum number of characters per chunk, at least 1
    /// * `chunk_overlap` - characters repeated between consecutive chunks,
    ///   strictly smaller than `chunk_size`
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(RagError::InvalidParameter(
                "chunk_size must be positive".to_string(),
            ));
        }
        if chunk_overlap >= chunk_size {
            return Err(RagError::InvalidParameter(format!(
                "chunk_overlap ({chunk_overlap}) must be smaller than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// Pick the end of the window starting at `start`, given that the text
    /// continues past `hard_end`.
    ///
    /// The cut keeps at least three quarters of the window (and always more
    /// than `chunk_overlap` characters) so the next start, `end - overlap`,
    /// strictly advances.
    fn break_before(&self, chars: &[char], start: usize, hard_end: usize) -> usize {
        let floor = start + (self.chunk_size * 3 / 4).max(self.chunk_overlap + 1);
        if floor >= hard_end {
            return hard_end;
        }
        for seq in BREAKS {
            if let Some(end) = rfind_seq(chars, floor, hard_end, seq) {
                return end;
            }
        }
        hard_end
    }
}

impl Chunker for TextChunker {
    fn chunk(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut start = 0;
        loop {
            let hard_end = (start + self.chunk_size).min(chars.len());
            let end = if hard_end == chars.len() {
                hard_end
            } else {
                self.break_before(&chars, start, hard_end)
            };
            chunks.push(chars[start..end].iter().collect());
            if end == chars.len() {
                break;
            }
            start = end - self.chunk_overlap;
        }
        chunks
    }
}

/// Scan backwards for `seq` lying fully inside `chars[lo..hi]`, returning
/// the index just past its last character.
fn rfind_seq(chars: &[char], lo: usize, hi: usize, seq: &[char]) -> Option<usize> {
    if hi - lo < seq.len() {
        return None;
    }
    let mut i = hi - seq.len();
    loop {
        if chars[i..i + seq.len()] == *seq {
            return Some(i + seq.len());
        }
        if i == lo {
            return None;
        }
        i -= 1;
    }
}
