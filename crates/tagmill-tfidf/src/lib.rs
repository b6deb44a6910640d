//! tagmill-tfidf - TF-IDF tag generation.
//!
//! Computes term-frequency–inverse-document-frequency scores for every
//! candidate term across the corpus and emits the top-k tags per document,
//! each carrying a raw score and a weight-adjusted score.
//!
//! # Example
//!
//! ```rust,ignore
//! use tagmill_tfidf::{GeneratorOptions, generate_tags};
//! use tagmill_types::WeightTable;
//!
//! let output = generate_tags(&documents, &WeightTable::new(), &GeneratorOptions::default());
//! ```

mod generator;
mod stats;

pub use generator::{GeneratorOptions, generate_tags, score_document};
pub use stats::{CorpusStats, IDF_FLOOR};
