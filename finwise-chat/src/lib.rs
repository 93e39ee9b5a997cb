//! # finwise-chat
//!
//! Grounded chat for FinWise assistants: retrieval, prompt assembly,
//! completion, and confidence scoring in one service.
//!
//! ## Overview
//!
//! This crate ties a `finwise-rag` pipeline and a `finwise-model` backend
//! into an answering service:
//!
//! - [`ChatService`] - retrieve context, prompt the model, score the answer
//! - [`PromptBuilder`] - deterministic prompts under a character budget
//! - [`confidence`] - count-based confidence scores and handling bands
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use finwise_chat::{ChatRequest, ChatService};
//! use finwise_model::OllamaModel;
//! use finwise_rag::{InMemoryVectorIndex, OllamaEmbeddingProvider, RagConfig, RagPipeline};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RagConfig::default();
//! let pipeline = RagPipeline::builder()
//!     .config(config.clone())
//!     .embedder(Arc::new(OllamaEmbeddingProvider::from_env()))
//!     .index(Arc::new(InMemoryVectorIndex::new(config.dimension)))
//!     .build()?;
//!
//! let service = ChatService::builder()
//!     .pipeline(Arc::new(pipeline))
//!     .model(Arc::new(OllamaModel::from_env()))
//!     .build()?;
//!
//! let response = service.chat(&ChatRequest::new("How do I budget?", "user-7")).await?;
//! println!("{}", response.response_text);
//! # Ok(())
//! # }
//! ```

pub mod confidence;
pub mod error;
pub mod prompt;
pub mod service;
pub mod types;

pub use confidence::{ConfidenceBand, ConfidenceBands, NO_CONTEXT_CONFIDENCE};
pub use error::{ChatError, Result};
pub use prompt::{BuiltPrompt, CONTEXT_DELIMITER, EMPTY_CONTEXT, PromptBuilder};
pub use service::{ChatConfig, ChatService, ChatServiceBuilder, SUPPORT_SUGGESTION};
pub use types::{ChatExchange, ChatRequest, ChatResponse, HealthReport, SourceRef};
