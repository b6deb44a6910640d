//! Tag review: composite relevance scoring and approval classification.
//!
//! The shipped reviewer is a deterministic simulation over the same
//! statistical signals used for generation, standing in for real human
//! feedback. The `TagReviewer` trait is the substitution seam: a future
//! human-input collector implements the same single operation and the
//! weight learner never notices the difference.

use std::collections::HashMap;

use tagmill_types::{Document, DocumentFeedback, DocumentTags, FeedbackRecord, FeedbackStatus, TagScore};

use crate::error::FeedbackError;
use crate::signals::{PositionScores, SignalWeights, frequency_score, position_score};

/// Scores and classifies one generated tag against its source document.
pub trait TagReviewer {
    /// Produce the feedback record for one (document, tag) pair.
    fn review(&self, document: &Document, tag: &TagScore) -> FeedbackRecord;
}

/// Deterministic rule-based reviewer.
///
/// Composite relevance is a weighted sum of three bounded sub-signals:
/// the tag's adjusted TF-IDF score (clamped to [0, 1]), a log-scaled
/// occurrence-count score, and a structural position score. A tag is
/// approved when the composite clears the approval threshold. Stateless
/// and free of randomness: the same inputs always yield the same record.
#[derive(Debug, Clone)]
pub struct SimulatedReviewer {
    weights: SignalWeights,
    position_scores: PositionScores,
    approval_threshold: f64,
}

impl Default for SimulatedReviewer {
    fn default() -> Self {
        Self {
            weights: SignalWeights::default(),
            position_scores: PositionScores::default(),
            approval_threshold: 0.6,
        }
    }
}

impl SimulatedReviewer {
    /// Build a reviewer with validated signal weights.
    ///
    /// # Errors
    ///
    /// Returns `FeedbackError::InvalidSignalWeights` when the weights do not
    /// sum to 1.0 (fail fast, before any document is processed).
    pub fn new(
        weights: SignalWeights,
        position_scores: PositionScores,
        approval_threshold: f64,
    ) -> Result<Self, FeedbackError> {
        weights.validate()?;
        Ok(Self {
            weights,
            position_scores,
            approval_threshold,
        })
    }

    /// The configured approval threshold.
    #[must_use]
    pub fn approval_threshold(&self) -> f64 {
        self.approval_threshold
    }
}

impl TagReviewer for SimulatedReviewer {
    fn review(&self, document: &Document, tag: &TagScore) -> FeedbackRecord {
        let tfidf_signal = tag.adjusted_score.clamp(0.0, 1.0);
        let freq_signal = frequency_score(&tag.tag, &document.tokens);
        let pos_signal = position_score(&tag.tag, &document.raw_text, &self.position_scores);

        let relevance_score = self.weights.tfidf * tfidf_signal
            + self.weights.frequency * freq_signal
            + self.weights.position * pos_signal;

        let status = if relevance_score >= self.approval_threshold {
            FeedbackStatus::Approved
        } else {
            FeedbackStatus::Rejected
        };

        FeedbackRecord {
            tag: tag.tag.clone(),
            status,
            relevance_score,
        }
    }
}

/// Review every generated tag against its source document.
///
/// Documents are matched by filename; tags for a document missing from the
/// corpus are skipped with a warning. Untagged documents simply contribute
/// no feedback, leaving their tags' weights at the default 1.0.
#[must_use]
pub fn synthesize_feedback(
    reviewer: &dyn TagReviewer,
    documents: &[Document],
    tags: &[DocumentTags],
) -> Vec<DocumentFeedback> {
    let by_name: HashMap<&str, &Document> = documents
        .iter()
        .map(|d| (d.filename.as_str(), d))
        .collect();

    tags.iter()
        .filter_map(|doc_tags| {
            let Some(document) = by_name.get(doc_tags.filename.as_str()) else {
                log::warn!(
                    "No document loaded for {}, skipping its tags",
                    doc_tags.filename
                );
                return None;
            };
            Some(DocumentFeedback {
                filename: doc_tags.filename.clone(),
                feedback: doc_tags
                    .tags
                    .iter()
                    .map(|tag| reviewer.review(document, tag))
                    .collect(),
            })
        })
        .collect()
}
