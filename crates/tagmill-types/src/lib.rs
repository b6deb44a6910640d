//! tagmill-types - Common type definitions for the Tagmill pipeline.
//!
//! This crate provides the shared data structures that flow between the
//! pipeline stages: documents out of the corpus loader, scored tags out of
//! the generator, feedback records out of the synthesizer, and the learned
//! weight table out of the learner. All artifact-facing types are
//! serialization-compatible with the on-disk JSON contract.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A text document loaded from the corpus folder.
///
/// Immutable once loaded. The corpus loader owns the collection; the
/// generator and feedback synthesizer only borrow it.
#[derive(Debug, Clone)]
pub struct Document {
    /// File name, unique within one pipeline run.
    pub filename: String,
    /// Raw file content, treated as plain text.
    pub raw_text: String,
    /// Normalized term sequence (lowercased, stemmed, stop words removed),
    /// in document order.
    pub tokens: Vec<String>,
}

impl Document {
    /// Build a document from raw text and its normalized token sequence.
    #[must_use]
    pub fn new(filename: String, raw_text: String, tokens: Vec<String>) -> Self {
        Self {
            filename,
            raw_text,
            tokens,
        }
    }

    /// Number of normalized tokens in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when no candidate terms survived normalization.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// A scored candidate tag for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagScore {
    /// Tag string, possibly a multi-word phrase.
    pub tag: String,
    /// Raw TF-IDF score, non-negative.
    pub raw_score: f64,
    /// `raw_score` multiplied by the learned weight for this tag
    /// (1.0 when the tag has no feedback history).
    pub adjusted_score: f64,
}

/// Generated tags for one document, ordered by adjusted score descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTags {
    /// Source document file name.
    pub filename: String,
    /// At most `top_k` tags, best first.
    pub tags: Vec<TagScore>,
}

/// Approval verdict for one generated tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStatus {
    /// Composite relevance cleared the approval threshold.
    Approved,
    /// Composite relevance fell below the approval threshold.
    Rejected,
}

impl FeedbackStatus {
    /// String form used in artifacts/logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Feedback on one (document, tag) pair.
///
/// `status` is `Approved` iff `relevance_score` is at or above the
/// configured approval threshold; the record carries no other state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// The reviewed tag.
    pub tag: String,
    /// Approval verdict against the configured threshold.
    pub status: FeedbackStatus,
    /// Weighted composite of the TF-IDF, frequency and position signals.
    pub relevance_score: f64,
}

/// Feedback for all generated tags of one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFeedback {
    /// Source document file name.
    pub filename: String,
    /// One record per generated tag, in generation order.
    pub feedback: Vec<FeedbackRecord>,
}

/// Learned per-tag multiplicative weights.
///
/// Tags with no feedback history implicitly weigh 1.0. Backed by a
/// `BTreeMap` so the persisted artifact has deterministic key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightTable(BTreeMap<String, f64>);

impl WeightTable {
    /// Create an empty weight table (every tag weighs 1.0).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight for a tag, defaulting to 1.0 when the tag has no history.
    #[must_use]
    pub fn get(&self, tag: &str) -> f64 {
        self.0.get(tag).copied().unwrap_or(1.0)
    }

    /// Set the weight for a tag.
    pub fn insert(&mut self, tag: String, weight: f64) {
        self.0.insert(tag, weight);
    }

    /// Number of tags with an explicit weight.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no tag has an explicit weight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(tag, weight)` entries in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.0.iter()
    }
}

impl FromIterator<(String, f64)> for WeightTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Metrics for one complete pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Documents loaded from the corpus folder.
    pub documents_processed: usize,
    /// Total tags emitted across all documents.
    pub tags_generated: usize,
    /// Tags the feedback synthesizer approved.
    pub approved_tags: usize,
    /// Tags the feedback synthesizer rejected.
    pub rejected_tags: usize,
    /// `approved / (approved + rejected)` in percent, 0.0 for an empty run.
    pub approval_rate_pct: f64,
    /// Unique tags that received a learned weight.
    pub tags_learned: usize,
    /// Learned tags with weight above 1.0.
    pub boosted_tags: usize,
    /// Learned tags with weight below 1.0.
    pub penalized_tags: usize,
    /// Wall-clock duration of the run in milliseconds.
    pub elapsed_ms: u64,
    /// Completion timestamp.
    pub completed_at: DateTime<Utc>,
}
