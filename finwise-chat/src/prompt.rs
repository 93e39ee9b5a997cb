//! Prompt assembly with a character budget.
//!
//! Prompts always read header, context block, query, in that order. When
//! the rendered prompt exceeds the budget, whole chunks are dropped from
//! the low-similarity end of the context until it fits; chunk text itself
//! is never truncated.

use finwise_rag::ScoredChunk;

/// Separator placed between context chunks.
pub const CONTEXT_DELIMITER: &str = "\n---\n";

/// Context block used when no chunks survive retrieval or the budget.
pub const EMPTY_CONTEXT: &str = "No specific context available.";

/// Default system header for the financial assistant.
pub const DEFAULT_HEADER: &str = "You are a financial assistant. Provide concise, helpful answers using the context below.\nKeep responses under 150 words for mobile users.";

/// Default prompt budget, in characters.
pub const DEFAULT_MAX_PROMPT_CHARS: usize = 4000;

/// A rendered prompt plus how many context chunks made it in.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltPrompt {
    pub text: String,
    /// Number of leading input chunks that were included.
    pub included: usize,
}

/// Deterministic prompt builder.
///
/// Rendering the same query and chunks always produces the same prompt.
/// Chunk texts are included verbatim, joined by [`CONTEXT_DELIMITER`], in
/// the order given (callers pass them ranked best first).
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    header: String,
    max_prompt_chars: usize,
}

impl PromptBuilder {
    /// Create a builder with the default header and budget.
    pub fn new() -> Self {
        Self {
            header: DEFAULT_HEADER.to_string(),
            max_prompt_chars: DEFAULT_MAX_PROMPT_CHARS,
        }
    }

    /// Replace the system header.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Replace the character budget.
    pub fn with_max_prompt_chars(mut self, max_prompt_chars: usize) -> Self {
        self.max_prompt_chars = max_prompt_chars;
        self
    }

    /// Render the prompt, dropping whole chunks from the end of `chunks`
    /// until the result fits the budget.
    ///
    /// The chunkless prompt is returned even when it alone exceeds the
    /// budget, so the query is never lost.
    pub fn build(&self, query: &str, chunks: &[ScoredChunk]) -> BuiltPrompt {
        let mut included = chunks.len();
        loop {
            let text = self.render(query, &chunks[..included]);
            if included == 0 || text.chars().count() <= self.max_prompt_chars {
                return BuiltPrompt { text, included };
            }
            included -= 1;
        }
    }

    fn render(&self, query: &str, chunks: &[ScoredChunk]) -> String {
        let context = if chunks.is_empty() {
            EMPTY_CONTEXT.to_string()
        } else {
            chunks
                .iter()
                .map(|scored| scored.chunk.text.as_str())
                .collect::<Vec<_>>()
                .join(CONTEXT_DELIMITER)
        };
        format!("{}\n\nCONTEXT:\n{}\n\n{}", self.header, context, query)
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}
