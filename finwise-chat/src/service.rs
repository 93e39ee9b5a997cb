//! Chat orchestration: retrieve, build the prompt, complete, score.

use std::sync::Arc;

use chrono::Utc;
use finwise_model::{LanguageModel, validate_params};
use finwise_rag::{DocumentMeta, ExtractedDocument, IngestReport, IngestSummary, RagPipeline};
use tracing::{error, info};

use crate::confidence::{self, ConfidenceBand, ConfidenceBands};
use crate::error::{ChatError, Result};
use crate::prompt::PromptBuilder;
use crate::types::{ChatExchange, ChatRequest, ChatResponse, HealthReport, SourceRef};

/// Appended to answers weak enough to need a human follow-up.
pub const SUPPORT_SUGGESTION: &str =
    "Need more help? Contact our customer service team for personalized assistance.";

/// Generation settings and confidence thresholds for the service.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Sampling temperature passed to the model.
    pub temperature: f32,
    /// Completion length cap passed to the model.
    pub max_tokens: u32,
    /// Thresholds for escalation and high confidence.
    pub bands: ConfidenceBands,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            max_tokens: 256,
            bands: ConfidenceBands::default(),
        }
    }
}

/// The FinWise answering service.
///
/// For each question the service retrieves context, builds a budgeted
/// prompt, asks the model, and scores the answer by how much context backed
/// it. An empty index is not an error: the model still answers, at low
/// confidence and with a handoff suggestion appended. Backend failures, by
/// contrast, surface as errors and are never disguised as weak answers.
pub struct ChatService {
    pipeline: Arc<RagPipeline>,
    model: Arc<dyn LanguageModel>,
    prompt_builder: PromptBuilder,
    config: ChatConfig,
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService")
            .field("prompt_builder", &self.prompt_builder)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// What one answering pass produces, before shaping for the caller.
struct ChatOutcome {
    exchange: ChatExchange,
    sources: Vec<SourceRef>,
    escalate: bool,
}

impl ChatService {
    /// Create a new [`ChatServiceBuilder`].
    pub fn builder() -> ChatServiceBuilder {
        ChatServiceBuilder::default()
    }

    /// Return a reference to the underlying retrieval pipeline.
    pub fn pipeline(&self) -> &Arc<RagPipeline> {
        &self.pipeline
    }

    async fn answer(&self, query: &str) -> Result<ChatOutcome> {
        info!(query_len = query.len(), "answering chat request");

        let retrieved = self.pipeline.retrieve(query, None).await?;
        let confidence = confidence::score(retrieved.len(), self.pipeline.config().top_k);

        let prompt = self.prompt_builder.build(query, &retrieved);
        let mut response_text = self
            .model
            .complete(&prompt.text, self.config.temperature, self.config.max_tokens)
            .await
            .map_err(|e| {
                error!(error = %e, "completion failed");
                e
            })?;

        let escalate = self.config.bands.band(confidence) == ConfidenceBand::Escalate;
        if escalate {
            response_text.push_str("\n\n");
            response_text.push_str(SUPPORT_SUGGESTION);
        }

        // Cite only the chunks that survived the prompt budget.
        let sources = retrieved[..prompt.included]
            .iter()
            .map(|scored| SourceRef {
                file_name: scored.chunk.file_name.clone(),
                chunk_index: scored.chunk.chunk_index,
            })
            .collect();

        info!(
            confidence,
            escalate,
            context_chunks = prompt.included,
            "chat request answered"
        );

        Ok(ChatOutcome {
            exchange: ChatExchange {
                query: query.to_string(),
                retrieved_chunks: retrieved,
                response_text,
                confidence,
                timestamp: Utc::now(),
            },
            sources,
            escalate,
        })
    }

    /// Answer a user question.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let outcome = self.answer(&request.query).await?;
        Ok(ChatResponse {
            response_text: outcome.exchange.response_text,
            confidence: outcome.exchange.confidence,
            escalate: outcome.escalate,
            sources: outcome.sources,
            user_id: request.user_id.clone(),
        })
    }

    /// Answer a question and return the full exchange record, including
    /// every retrieved chunk.
    pub async fn chat_exchange(&self, query: &str) -> Result<ChatExchange> {
        Ok(self.answer(query).await?.exchange)
    }

    /// Ingest one document into the service's index.
    pub async fn ingest(&self, text: &str, meta: &DocumentMeta) -> Result<IngestReport> {
        Ok(self.pipeline.ingest(text, meta).await?)
    }

    /// Ingest several documents, skipping the ones that fail.
    pub async fn ingest_many(&self, documents: &[ExtractedDocument]) -> IngestSummary {
        self.pipeline.ingest_many(documents).await
    }

    /// Remove every indexed chunk.
    pub async fn clear_index(&self) -> Result<()> {
        Ok(self.pipeline.clear().await?)
    }

    /// Probe the embedding backend, the model, and the index.
    pub async fn health(&self) -> HealthReport {
        let embedding_ok = self.pipeline.embedder().health_check().await;
        let model_ok = self.model.health_check().await;
        let indexed_chunks = self.pipeline.count().await.unwrap_or(0);
        HealthReport {
            embedding_ok,
            model_ok,
            indexed_chunks,
        }
    }
}

/// Builder for constructing a [`ChatService`].
///
/// `pipeline` and `model` are required; the prompt builder and config fall
/// back to their defaults.
#[derive(Default)]
pub struct ChatServiceBuilder {
    pipeline: Option<Arc<RagPipeline>>,
    model: Option<Arc<dyn LanguageModel>>,
    prompt_builder: Option<PromptBuilder>,
    config: Option<ChatConfig>,
}

impl ChatServiceBuilder {
    /// Set the retrieval pipeline.
    pub fn pipeline(mut self, pipeline: Arc<RagPipeline>) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    /// Set the language model.
    pub fn model(mut self, model: Arc<dyn LanguageModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Replace the default prompt builder.
    pub fn prompt_builder(mut self, prompt_builder: PromptBuilder) -> Self {
        self.prompt_builder = Some(prompt_builder);
        self
    }

    /// Replace the default generation settings.
    pub fn config(mut self, config: ChatConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the [`ChatService`], validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Config`] if a required component is missing,
    /// the generation settings are out of range, or the confidence
    /// thresholds are inverted.
    pub fn build(self) -> Result<ChatService> {
        let pipeline = self
            .pipeline
            .ok_or_else(|| ChatError::Config("pipeline is required".to_string()))?;
        let model = self
            .model
            .ok_or_else(|| ChatError::Config("model is required".to_string()))?;
        let config = self.config.unwrap_or_default();

        validate_params(config.temperature, config.max_tokens)
            .map_err(|e| ChatError::Config(format!("generation settings: {e}")))?;
        if config.bands.escalate_below > config.bands.high_from {
            return Err(ChatError::Config(format!(
                "escalate_below ({}) must not exceed high_from ({})",
                config.bands.escalate_below, config.bands.high_from
            )));
        }

        Ok(ChatService {
            pipeline,
            model,
            prompt_builder: self.prompt_builder.unwrap_or_default(),
            config,
        })
    }
}
