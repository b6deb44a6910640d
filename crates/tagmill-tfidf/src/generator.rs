//! TF-IDF tag generation.
//!
//! Scores every candidate term per document against corpus-wide statistics,
//! adjusts the raw score by the learned weight table, and keeps the top-k
//! tags per document.

use std::collections::HashMap;

use rayon::prelude::*;

use tagmill_types::{Document, DocumentTags, TagScore, WeightTable};

use crate::stats::CorpusStats;

/// Options for tag generation.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Maximum tags emitted per document.
    pub top_k: usize,
    /// Longest candidate phrase length in words (1 = single tokens only).
    pub max_ngram: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            top_k: 5,
            max_ngram: 1,
        }
    }
}

/// Generate tags for every document in the corpus.
///
/// The document-frequency table is computed once and shared read-only;
/// per-document scoring fans out across worker threads. Output order is by
/// the input (filename) order, never completion order, and the whole pass
/// is deterministic for a fixed corpus and weight table.
#[must_use]
pub fn generate_tags(
    documents: &[Document],
    weights: &WeightTable,
    options: &GeneratorOptions,
) -> Vec<DocumentTags> {
    let stats = CorpusStats::build(documents, options.max_ngram);
    log::debug!(
        "Scoring {} documents, top_k={}",
        documents.len(),
        options.top_k
    );

    documents
        .par_iter()
        .map(|doc| score_document(doc, &stats, weights, options))
        .collect()
}

/// Score one document against precomputed corpus statistics.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn score_document(
    document: &Document,
    stats: &CorpusStats,
    weights: &WeightTable,
    options: &GeneratorOptions,
) -> DocumentTags {
    // Empty document: no candidate terms, empty tag list, not an error.
    if document.is_empty() {
        return DocumentTags {
            filename: document.filename.clone(),
            tags: Vec::new(),
        };
    }

    let mut term_counts: HashMap<String, usize> = HashMap::new();
    for term in tagmill_text::candidate_terms(&document.tokens, options.max_ngram) {
        *term_counts.entry(term).or_insert(0) += 1;
    }

    let doc_len = document.len() as f64;
    let mut scored: Vec<TagScore> = term_counts
        .into_iter()
        .map(|(term, count)| {
            let tf = count as f64 / doc_len;
            let raw_score = tf * stats.idf(&term);
            let adjusted_score = raw_score * weights.get(&term);
            TagScore {
                tag: term,
                raw_score,
                adjusted_score,
            }
        })
        .collect();

    // Deterministic ordering: adjusted desc, raw desc, then tag asc.
    scored.sort_by(|a, b| {
        b.adjusted_score
            .total_cmp(&a.adjusted_score)
            .then_with(|| b.raw_score.total_cmp(&a.raw_score))
            .then_with(|| a.tag.cmp(&b.tag))
    });
    scored.truncate(options.top_k);
    scored.retain(|t| t.adjusted_score > 0.0);

    DocumentTags {
        filename: document.filename.clone(),
        tags: scored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str, text: &str) -> Document {
        Document::new(
            name.to_string(),
            text.to_string(),
            tagmill_text::tokenize(text),
        )
    }

    #[test]
    fn test_at_most_top_k_tags_sorted_descending() {
        let docs = vec![doc(
            "a.txt",
            "alpha alpha alpha beta beta gamma delta epsilon",
        )];
        let options = GeneratorOptions {
            top_k: 3,
            max_ngram: 1,
        };
        let output = generate_tags(&docs, &WeightTable::new(), &options);

        assert_eq!(output.len(), 1);
        let tags = &output[0].tags;
        assert!(tags.len() <= 3);
        for pair in tags.windows(2) {
            assert!(pair[0].adjusted_score >= pair[1].adjusted_score);
        }
        for tag in tags {
            assert!(tag.raw_score >= 0.0);
            assert!(tag.adjusted_score >= 0.0);
        }
    }

    #[test]
    fn test_adjusted_is_raw_times_weight_exactly() {
        let docs = vec![
            doc("a.txt", "neural network training"),
            doc("b.txt", "database index"),
        ];
        let mut weights = WeightTable::new();
        weights.insert("neural".to_string(), 1.3);

        let output = generate_tags(&docs, &weights, &GeneratorOptions::default());
        for doc_tags in &output {
            for tag in &doc_tags.tags {
                let expected = tag.raw_score * weights.get(&tag.tag);
                assert!((tag.adjusted_score - expected).abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn test_weight_reorders_ranking() {
        // "alpha" occurs more often, but a strong penalty drops it below "beta".
        let docs = vec![
            doc("a.txt", "alpha alpha alpha beta beta"),
            doc("b.txt", "gamma delta"),
        ];
        let mut weights = WeightTable::new();
        weights.insert("alpha".to_string(), 0.5);

        let output = generate_tags(&docs, &weights, &GeneratorOptions::default());
        let tags = &output[0].tags;
        assert_eq!(tags[0].tag, "beta");
        assert_eq!(tags[1].tag, "alpha");
    }

    #[test]
    fn test_empty_document_yields_empty_tags() {
        let docs = vec![doc("empty.txt", ""), doc("full.txt", "content here")];
        let output = generate_tags(&docs, &WeightTable::new(), &GeneratorOptions::default());
        assert_eq!(output[0].filename, "empty.txt");
        assert!(output[0].tags.is_empty());
        assert!(!output[1].tags.is_empty());
    }

    #[test]
    fn test_stop_words_only_document_yields_empty_tags() {
        let docs = vec![doc("stops.txt", "the and of with"), doc("b.txt", "payload")];
        let output = generate_tags(&docs, &WeightTable::new(), &GeneratorOptions::default());
        assert!(output[0].tags.is_empty());
    }

    #[test]
    fn test_single_document_corpus_has_finite_scores() {
        let docs = vec![doc("only.txt", "machine learning machine")];
        let output = generate_tags(&docs, &WeightTable::new(), &GeneratorOptions::default());
        assert!(!output[0].tags.is_empty());
        for tag in &output[0].tags {
            assert!(tag.raw_score.is_finite());
            assert!(tag.raw_score > 0.0);
        }
    }

    #[test]
    fn test_ties_break_lexicographically() {
        // Same frequency, same idf: ordering must fall back to tag order.
        let docs = vec![doc("a.txt", "zebra apple mango")];
        let output = generate_tags(&docs, &WeightTable::new(), &GeneratorOptions::default());
        let tags: Vec<&str> = output[0].tags.iter().map(|t| t.tag.as_str()).collect();
        let mut sorted = tags.clone();
        sorted.sort_unstable();
        assert_eq!(tags, sorted);
    }

    #[test]
    fn test_generation_is_idempotent() {
        let docs = vec![
            doc("a.txt", "rust memory safety ownership"),
            doc("b.txt", "garbage collection pauses"),
        ];
        let mut weights = WeightTable::new();
        weights.insert("memori".to_string(), 1.1);

        let options = GeneratorOptions::default();
        let first = generate_tags(&docs, &weights, &options);
        let second = generate_tags(&docs, &weights, &options);
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.filename, b.filename);
            assert_eq!(a.tags, b.tags);
        }
    }

    #[test]
    fn test_output_order_matches_input_order() {
        let docs = vec![
            doc("first.txt", "alpha"),
            doc("second.txt", "beta"),
            doc("third.txt", "gamma"),
        ];
        let output = generate_tags(&docs, &WeightTable::new(), &GeneratorOptions::default());
        let names: Vec<&str> = output.iter().map(|o| o.filename.as_str()).collect();
        assert_eq!(names, vec!["first.txt", "second.txt", "third.txt"]);
    }

    #[test]
    fn test_bigram_candidates_when_enabled() {
        let docs = vec![
            doc("a.txt", "neural network neural network"),
            doc("b.txt", "unrelated words"),
        ];
        let options = GeneratorOptions {
            top_k: 10,
            max_ngram: 2,
        };
        let output = generate_tags(&docs, &WeightTable::new(), &options);
        assert!(
            output[0]
                .tags
                .iter()
                .any(|t| t.tag == "neural network")
        );
    }

    #[test]
    fn test_frequency_leaders_rank_first_in_single_document() {
        // Single document "machine learning machine learning neural networks":
        // "machine" and "learning" lead the ranking by frequency.
        let docs = vec![doc(
            "ml.txt",
            "machine learning machine learning neural networks",
        )];
        let options = GeneratorOptions {
            top_k: 3,
            max_ngram: 1,
        };
        let output = generate_tags(&docs, &WeightTable::new(), &options);
        let tags = &output[0].tags;
        assert_eq!(tags.len(), 3);
        // Stemmed forms: learning -> learn, networks -> network.
        let top_two: Vec<&str> = tags[..2].iter().map(|t| t.tag.as_str()).collect();
        assert!(top_two.contains(&"machin"));
        assert!(top_two.contains(&"learn"));
        assert!(tags[0].raw_score >= tags[2].raw_score);
    }
}
