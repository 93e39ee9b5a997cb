//! # finwise-model
//!
//! Language model integrations for FinWise assistants.
//!
//! ## Overview
//!
//! This crate provides text completion backends behind one trait:
//!
//! - [`LanguageModel`] - async completion with validated parameters
//! - [`OllamaModel`] - local models served by Ollama (`phi3:mini` by default)
//! - [`MockModel`] - scriptable model for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use finwise_model::{LanguageModel, OllamaModel};
//!
//! # async fn run() -> finwise_model::Result<()> {
//! let model = OllamaModel::from_env();
//! let answer = model.complete("What is an APR?", 0.2, 256).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod llm;
pub mod mock;
pub mod ollama;

pub use error::{ModelError, Result};
pub use llm::{LanguageModel, MAX_TEMPERATURE, validate_params};
pub use mock::MockModel;
pub use ollama::OllamaModel;
