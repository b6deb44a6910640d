//! Error types for feedback synthesis.

use thiserror::Error;

/// Error types for feedback synthesis configuration.
#[derive(Error, Debug)]
pub enum FeedbackError {
    /// Composite signal weights must sum to 1.0.
    #[error("Signal weights must sum to 1.0, got {0}")]
    InvalidSignalWeights(f64),
}
