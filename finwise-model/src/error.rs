//! Error types for the `finwise-model` crate.

use thiserror::Error;

/// Errors that can occur when calling a language model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A caller-supplied parameter was out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The model backend did not respond within the deadline.
    #[error("model {model} timed out after {seconds}s")]
    Timeout {
        /// Model identifier, e.g. "phi3:mini".
        model: String,
        /// Configured request timeout.
        seconds: u64,
    },

    /// The model backend rejected the request or could not be reached.
    #[error("model {model} unavailable: {message}")]
    Unavailable {
        /// Model identifier, e.g. "phi3:mini".
        model: String,
        /// Backend error detail.
        message: String,
    },
}

/// Convenience result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
