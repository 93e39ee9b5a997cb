//! Language model trait for text completion.

use async_trait::async_trait;

use crate::error::{ModelError, Result};

/// Highest temperature accepted by [`validate_params`].
pub const MAX_TEMPERATURE: f32 = 2.0;

/// A text completion backend.
///
/// Implementations wrap a concrete model server (Ollama, a hosted API, a
/// test double) behind a single async call. Completions are plain strings;
/// conversation state, if any, lives with the caller.
///
/// # Example
///
/// ```rust,ignore
/// use finwise_model::LanguageModel;
///
/// let answer = model.complete(&prompt, 0.2, 256).await?;
/// ```
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a completion for `prompt`.
    ///
    /// `temperature` must lie in `[0.0, 2.0]` and `max_tokens` must be
    /// positive; implementations reject anything else with
    /// [`ModelError::InvalidParameter`].
    async fn complete(&self, prompt: &str, temperature: f32, max_tokens: u32) -> Result<String>;

    /// Short model identifier, e.g. "phi3:mini".
    fn model_name(&self) -> &str;

    /// Probe whether the backend is reachable.
    ///
    /// Models with no remote dependency report `true`.
    async fn health_check(&self) -> bool {
        true
    }
}

/// Validate the completion parameters shared by every backend.
///
/// Rejects NaN temperatures along with anything outside `[0.0, 2.0]`, and
/// a `max_tokens` of zero.
pub fn validate_params(temperature: f32, max_tokens: u32) -> Result<()> {
    if !(0.0..=MAX_TEMPERATURE).contains(&temperature) {
        return Err(ModelError::InvalidParameter(format!(
            "temperature {temperature} outside [0, {MAX_TEMPERATURE}]"
        )));
    }
    if max_tokens == 0 {
        return Err(ModelError::InvalidParameter(
            "max_tokens must be positive".to_string(),
        ));
    }
    Ok(())
}
