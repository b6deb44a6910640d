//! Pipeline configuration loader.
//!
//! Built-in defaults, optionally overridden by a YAML config file, then by
//! CLI flags. Validation fails fast before any document is processed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use tagmill_feedback::{PositionScores, SignalWeights};
use tagmill_learn::LearningBuckets;
use tagmill_tfidf::GeneratorOptions;

/// CLI overrides applied on top of the loaded configuration.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct Overrides {
    /// Path to the documents folder.
    #[arg(long)]
    pub documents: Option<PathBuf>,

    /// Path to the output directory for artifacts.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Number of top tags generated per document.
    #[arg(long)]
    pub top_k: Option<usize>,
}

/// Flat configuration surface for the whole pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Folder containing the corpus documents.
    pub documents_folder: PathBuf,
    /// Directory receiving the three run artifacts.
    pub output_dir: PathBuf,
    /// Tags generated per document.
    pub top_k: usize,
    /// Longest candidate phrase length in words.
    pub max_ngram: usize,
    /// Weight of the TF-IDF signal in the feedback composite.
    pub tfidf_weight: f64,
    /// Weight of the frequency signal in the feedback composite.
    pub frequency_weight: f64,
    /// Weight of the position signal in the feedback composite.
    pub position_weight: f64,
    /// Approve/reject cutoff for the composite relevance score.
    pub approval_threshold: f64,
    /// Zone scores for the position signal.
    pub position_scores: PositionScores,
    /// Approval-rate buckets for weight learning.
    pub learning_buckets: LearningBuckets,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            documents_folder: PathBuf::from("documents"),
            output_dir: PathBuf::from("outputs"),
            top_k: 5,
            max_ngram: 1,
            tfidf_weight: 0.5,
            frequency_weight: 0.2,
            position_weight: 0.3,
            approval_threshold: 0.6,
            position_scores: PositionScores::default(),
            learning_buckets: LearningBuckets::default(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration: defaults, then the YAML file when given.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                serde_yaml::from_str(&text)
                    .with_context(|| format!("failed to parse config file {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply CLI flag overrides.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(documents) = &overrides.documents {
            self.documents_folder.clone_from(documents);
        }
        if let Some(output) = &overrides.output {
            self.output_dir.clone_from(output);
        }
        if let Some(top_k) = overrides.top_k {
            self.top_k = top_k;
        }
    }

    /// Fail fast on configuration errors, before any processing.
    ///
    /// # Errors
    ///
    /// Returns an error for non-positive `top_k`/`max_ngram`, signal
    /// weights not summing to 1.0, or malformed learning buckets.
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            bail!("top_k must be positive");
        }
        if self.max_ngram == 0 {
            bail!("max_ngram must be positive");
        }
        self.signal_weights()?;
        self.learning_buckets.validate()?;
        Ok(())
    }

    /// Validated composite signal weights.
    ///
    /// # Errors
    ///
    /// Returns an error when the weights do not sum to 1.0.
    pub fn signal_weights(&self) -> Result<SignalWeights> {
        Ok(SignalWeights::new(
            self.tfidf_weight,
            self.frequency_weight,
            self.position_weight,
        )?)
    }

    /// Generator options derived from this configuration.
    #[must_use]
    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            top_k: self.top_k,
            max_ngram: self.max_ngram,
        }
    }

    /// Path of the tags artifact.
    #[must_use]
    pub fn tags_path(&self) -> PathBuf {
        self.output_dir.join("tags.json")
    }

    /// Path of the feedback artifact.
    #[must_use]
    pub fn feedback_path(&self) -> PathBuf {
        self.output_dir.join("feedback.json")
    }

    /// Path of the persisted weight table.
    #[must_use]
    pub fn weights_path(&self) -> PathBuf {
        self.output_dir.join("tag_weights.json")
    }
}
