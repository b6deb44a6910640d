//! Error types for weight learning configuration.

use thiserror::Error;

/// Error types for weight learning configuration.
#[derive(Error, Debug)]
pub enum LearnError {
    /// Bucket boundaries or weights are malformed.
    #[error("Invalid learning buckets: {0}")]
    InvalidBuckets(String),
}
