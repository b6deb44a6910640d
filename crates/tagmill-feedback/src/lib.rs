//! tagmill-feedback - Multi-signal feedback synthesis for generated tags.
//!
//! Computes a composite relevance score per tag from three independent
//! signals (adjusted TF-IDF, occurrence frequency, structural position) and
//! classifies each tag as approved or rejected against a threshold. The
//! shipped reviewer is a deterministic simulation; the `TagReviewer` trait
//! is the seam for substituting a real feedback collector later.

mod error;
mod reviewer;
mod signals;

pub use error::FeedbackError;
pub use reviewer::{SimulatedReviewer, TagReviewer, synthesize_feedback};
pub use signals::{
    PositionScores, SignalWeights, frequency_score, position_score, term_occurrences,
};
