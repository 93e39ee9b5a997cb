//! Confidence scoring for grounded answers.
//!
//! The score reflects only how many of the requested chunks retrieval
//! returned, not how relevant they were. It is a coarse signal for when to
//! hedge and when to hand off to a human.

use serde::{Deserialize, Serialize};

/// Confidence assigned when retrieval returned nothing.
pub const NO_CONTEXT_CONFIDENCE: f32 = 0.2;

/// Default confidence floor below which a human handoff is suggested.
pub const DEFAULT_ESCALATE_BELOW: f32 = 0.5;

/// Default confidence from which an answer counts as well grounded.
pub const DEFAULT_HIGH_FROM: f32 = 0.75;

/// Score an answer from the amount of context that backed it.
///
/// Zero retrieved chunks score exactly 0.2. Otherwise the score is
/// `0.5 + (retrieved / top_k) * 0.5`, capped at 1.0, so a full complement
/// of `top_k` chunks scores 1.0.
pub fn score(retrieved_count: usize, top_k: usize) -> f32 {
    if retrieved_count == 0 || top_k == 0 {
        return NO_CONTEXT_CONFIDENCE;
    }
    let filled = retrieved_count.min(top_k) as f32 / top_k as f32;
    (0.5 + filled * 0.5).min(1.0)
}

/// How an answer's confidence should be handled downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    /// Too weak to stand alone; suggest human help.
    Escalate,
    /// Usable, with hedging.
    Moderate,
    /// Well grounded.
    High,
}

/// Thresholds mapping a confidence score to a [`ConfidenceBand`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBands {
    /// Scores strictly below this escalate.
    pub escalate_below: f32,
    /// Scores at or above this are high confidence.
    pub high_from: f32,
}

impl Default for ConfidenceBands {
    fn default() -> Self {
        Self {
            escalate_below: DEFAULT_ESCALATE_BELOW,
            high_from: DEFAULT_HIGH_FROM,
        }
    }
}

impl ConfidenceBands {
    /// Map a score to its band.
    pub fn band(&self, confidence: f32) -> ConfidenceBand {
        if confidence < self.escalate_below {
            ConfidenceBand::Escalate
        } else if confidence < self.high_from {
            ConfidenceBand::Moderate
        } else {
            ConfidenceBand::High
        }
    }
}
