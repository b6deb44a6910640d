//! Approval-rate buckets mapping feedback history to tag weights.

use serde::{Deserialize, Serialize};

use crate::error::LearnError;

/// Fixed, non-overlapping approval-rate buckets.
///
/// Boundaries are inclusive on the lower bound: an approval rate of exactly
/// 0.5 lands in the mild-boost bucket, exactly 0.2 in mild-penalty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearningBuckets {
    /// Lower bound of the strong-boost bucket.
    pub strong_boost_min: f64,
    /// Weight for tags at or above `strong_boost_min`.
    pub strong_boost_weight: f64,
    /// Lower bound of the mild-boost bucket.
    pub mild_boost_min: f64,
    /// Weight for tags at or above `mild_boost_min`.
    pub mild_boost_weight: f64,
    /// Lower bound of the mild-penalty bucket.
    pub mild_penalty_min: f64,
    /// Weight for tags at or above `mild_penalty_min`.
    pub mild_penalty_weight: f64,
    /// Weight for tags below `mild_penalty_min`.
    pub strong_penalty_weight: f64,
}

impl Default for LearningBuckets {
    fn default() -> Self {
        Self {
            strong_boost_min: 0.80,
            strong_boost_weight: 1.3,
            mild_boost_min: 0.50,
            mild_boost_weight: 1.1,
            mild_penalty_min: 0.20,
            mild_penalty_weight: 0.8,
            strong_penalty_weight: 0.5,
        }
    }
}

impl LearningBuckets {
    /// Validate boundary ordering and weight positivity.
    ///
    /// # Errors
    ///
    /// Returns `LearnError::InvalidBuckets` when boundaries are not strictly
    /// descending within (0, 1] or any weight is non-positive.
    pub fn validate(&self) -> Result<(), LearnError> {
        if !(self.strong_boost_min > self.mild_boost_min
            && self.mild_boost_min > self.mild_penalty_min
            && self.mild_penalty_min > 0.0
            && self.strong_boost_min <= 1.0)
        {
            return Err(LearnError::InvalidBuckets(format!(
                "boundaries must descend within (0, 1]: {} / {} / {}",
                self.strong_boost_min, self.mild_boost_min, self.mild_penalty_min
            )));
        }
        let weights = [
            self.strong_boost_weight,
            self.mild_boost_weight,
            self.mild_penalty_weight,
            self.strong_penalty_weight,
        ];
        if weights.iter().any(|w| *w <= 0.0) {
            return Err(LearnError::InvalidBuckets(
                "weights must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Map an approval rate to its bucket weight.
    #[must_use]
    pub fn weight_for(&self, approval_rate: f64) -> f64 {
        if approval_rate >= self.strong_boost_min {
            self.strong_boost_weight
        } else if approval_rate >= self.mild_boost_min {
            self.mild_boost_weight
        } else if approval_rate >= self.mild_penalty_min {
            self.mild_penalty_weight
        } else {
            self.strong_penalty_weight
        }
    }
}
