//! Relevance sub-signals for generated tags.
//!
//! Each signal is independently bounded to [0, 1] so the weighted composite
//! stays comparable across documents of different sizes.

use serde::{Deserialize, Serialize};

use crate::error::FeedbackError;

/// Tolerance for the weights-sum-to-one invariant.
const WEIGHT_SUM_EPSILON: f64 = 1e-6;

/// Weights of the three relevance sub-signals. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalWeights {
    /// Weight of the tag's adjusted TF-IDF score.
    pub tfidf: f64,
    /// Weight of the normalized occurrence-count signal.
    pub frequency: f64,
    /// Weight of the structural position signal.
    pub position: f64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            tfidf: 0.5,
            frequency: 0.2,
            position: 0.3,
        }
    }
}

impl SignalWeights {
    /// Build a validated weight set.
    ///
    /// # Errors
    ///
    /// Returns `FeedbackError::InvalidSignalWeights` when the weights do not
    /// sum to 1.0.
    pub fn new(tfidf: f64, frequency: f64, position: f64) -> Result<Self, FeedbackError> {
        let weights = Self {
            tfidf,
            frequency,
            position,
        };
        weights.validate()?;
        Ok(weights)
    }

    /// Validate the sum-to-one invariant.
    ///
    /// # Errors
    ///
    /// Returns `FeedbackError::InvalidSignalWeights` when violated.
    pub fn validate(&self) -> Result<(), FeedbackError> {
        let sum = self.tfidf + self.frequency + self.position;
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(FeedbackError::InvalidSignalWeights(sum));
        }
        Ok(())
    }
}

/// Zone scores for the position signal.
///
/// Earlier structural zones score higher: a tag found in the title is a
/// stronger relevance cue than one buried in the body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionScores {
    /// Tag appears in the first line.
    pub title: f64,
    /// Tag appears in a header within the first ten lines.
    pub header: f64,
    /// Tag appears in the first substantial paragraph.
    pub first_paragraph: f64,
    /// Tag appears anywhere else in the text.
    pub body: f64,
    /// Tag does not appear in the raw text.
    pub absent: f64,
}

impl Default for PositionScores {
    fn default() -> Self {
        Self {
            title: 1.0,
            header: 0.8,
            first_paragraph: 0.6,
            body: 0.4,
            absent: 0.0,
        }
    }
}

/// Count occurrences of a tag's terms in a normalized token sequence.
///
/// Multi-word tags are counted as adjacent-token phrase matches.
#[must_use]
pub fn term_occurrences(tag: &str, tokens: &[String]) -> usize {
    let parts: Vec<&str> = tag.split_whitespace().collect();
    match parts.as_slice() {
        [] => 0,
        [single] => tokens.iter().filter(|t| t == single).count(),
        phrase => tokens
            .windows(phrase.len())
            .filter(|w| w.iter().zip(phrase.iter()).all(|(a, b)| a == b))
            .count(),
    }
}

/// Normalized frequency score in [0, 1].
///
/// Logarithmic scaling, `ln(count + 1) / ln(10)` capped at 1.0, so high
/// counts give diminishing returns.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn frequency_score(tag: &str, tokens: &[String]) -> f64 {
    let count = term_occurrences(tag, tokens);
    if count == 0 {
        return 0.0;
    }
    (((count + 1) as f64).ln() / 10.0_f64.ln()).min(1.0)
}

/// Structural position score based on where the tag first appears.
///
/// Checks, in order: the title line, headers within the first ten lines
/// (markdown `#`, short ALL-CAPS lines, short colon-bearing lines), the
/// first substantial paragraph, then anywhere in the body.
#[must_use]
pub fn position_score(tag: &str, raw_text: &str, scores: &PositionScores) -> f64 {
    let tag_lower = tag.to_lowercase();
    let lines: Vec<&str> = raw_text.lines().collect();

    // First line is the title.
    if let Some(first) = lines.first()
        && first.to_lowercase().contains(&tag_lower)
    {
        return scores.title;
    }

    // Headers among the first ten lines.
    for line in lines.iter().take(10) {
        if !line.to_lowercase().contains(&tag_lower) {
            continue;
        }
        let trimmed = line.trim();
        if trimmed.starts_with('#')
            || (is_all_caps(trimmed) && trimmed.len() < 50)
            || (trimmed.len() < 30 && trimmed.contains(':'))
        {
            return scores.header;
        }
    }

    // First substantial text block.
    let first_paragraph = lines
        .iter()
        .map(|l| l.trim())
        .find(|l| !l.is_empty() && !l.starts_with('#') && l.len() > 20);
    if let Some(paragraph) = first_paragraph
        && paragraph.to_lowercase().contains(&tag_lower)
    {
        return scores.first_paragraph;
    }

    if raw_text.to_lowercase().contains(&tag_lower) {
        return scores.body;
    }

    scores.absent
}

fn is_all_caps(s: &str) -> bool {
    s.chars().any(char::is_alphabetic) && !s.chars().any(char::is_lowercase)
}
