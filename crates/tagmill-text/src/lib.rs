//! tagmill-text - Text normalization for keyword extraction.
//!
//! Turns raw document text into the normalized term sequence shared by the
//! tag generator and the feedback synthesizer:
//! lowercase → strip non-alphabetic characters → tokenize → stem →
//! drop stop words and short tokens.
//!
//! # Example
//!
//! ```rust
//! use tagmill_text::tokenize;
//!
//! let tokens = tokenize("Neural networks are learning machines.");
//! assert_eq!(tokens, vec!["neural", "network", "learn", "machin"]);
//! ```

mod stopwords;

pub use stopwords::is_stop_word;

use rust_stemmers::{Algorithm, Stemmer};

/// Options for the normalization pipeline.
#[derive(Debug, Clone)]
pub struct TokenizerOptions {
    /// Minimum token length after stemming (shorter tokens are dropped).
    pub min_token_len: usize,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self { min_token_len: 3 }
    }
}

/// Normalize text into a term sequence using default options.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    tokenize_with(text, &TokenizerOptions::default())
}

/// Normalize text into a term sequence.
///
/// Pipeline, in order: lowercase, replace every non-alphabetic character
/// with a space, split on whitespace, stem (English Snowball), drop stop
/// words and tokens shorter than `min_token_len`. Document order of the
/// surviving terms is preserved so positional signals stay meaningful.
#[must_use]
pub fn tokenize_with(text: &str, options: &TokenizerOptions) -> Vec<String> {
    let stemmer = Stemmer::create(Algorithm::English);

    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphabetic() { c } else { ' ' })
        .collect();

    cleaned
        .split_whitespace()
        .map(|word| stemmer.stem(word).to_string())
        .filter(|token| token.len() >= options.min_token_len && !is_stop_word(token))
        .collect()
}

/// Generate word n-grams from a token sequence.
///
/// Adjacent-token windows joined by single spaces. Returns an empty vector
/// when the sequence is shorter than `n` or `n` is zero.
#[must_use]
pub fn ngrams(tokens: &[String], n: usize) -> Vec<String> {
    if n == 0 || tokens.len() < n {
        return Vec::new();
    }
    tokens.windows(n).map(|w| w.join(" ")).collect()
}

/// Generate all candidate terms up to `max_ngram` words, unigrams first.
#[must_use]
pub fn candidate_terms(tokens: &[String], max_ngram: usize) -> Vec<String> {
    let mut candidates = Vec::new();
    for n in 1..=max_ngram.max(1) {
        candidates.extend(ngrams(tokens, n));
    }
    candidates
}
