//! Corpus-wide term statistics.
//!
//! Document frequencies are computed once per run and shared read-only by
//! every per-document scoring pass.

use std::collections::{HashMap, HashSet};

use tagmill_types::Document;

/// Floor for inverse document frequency.
///
/// A term present in every document (and any term in a single-document
/// corpus) would score `ln(1) = 0`; clamping keeps the score a small
/// positive value instead of zeroing the whole ranking.
pub const IDF_FLOOR: f64 = 1e-3;

/// Corpus-wide document-frequency table.
#[derive(Debug, Clone)]
pub struct CorpusStats {
    total_docs: usize,
    doc_freq: HashMap<String, usize>,
}

impl CorpusStats {
    /// Count, for every candidate term up to `max_ngram` words, the number
    /// of documents containing it.
    #[must_use]
    pub fn build(documents: &[Document], max_ngram: usize) -> Self {
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let unique: HashSet<String> = tagmill_text::candidate_terms(&doc.tokens, max_ngram)
                .into_iter()
                .collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        Self {
            total_docs: documents.len(),
            doc_freq,
        }
    }

    /// Number of documents in the corpus.
    #[must_use]
    pub fn total_docs(&self) -> usize {
        self.total_docs
    }

    /// Number of documents containing a term.
    #[must_use]
    pub fn doc_freq(&self, term: &str) -> usize {
        self.doc_freq.get(term).copied().unwrap_or(0)
    }

    /// Inverse document frequency: `ln(total_docs / doc_freq)`, clamped to
    /// [`IDF_FLOOR`]. Unknown terms score the floor as well.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn idf(&self, term: &str) -> f64 {
        let df = self.doc_freq(term);
        if df == 0 || self.total_docs == 0 {
            return IDF_FLOOR;
        }
        (self.total_docs as f64 / df as f64).ln().max(IDF_FLOOR)
    }
}
