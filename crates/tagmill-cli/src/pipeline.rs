//! Pipeline orchestration: generate → feedback → learn.
//!
//! A single-pass, synchronous batch run. The feedback loop closes across
//! invocations: weights learned at the end of one run adjust generation
//! scores at the start of the next.

use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;

use tagmill_corpus::{CorpusOptions, load_documents};
use tagmill_feedback::{SimulatedReviewer, synthesize_feedback};
use tagmill_learn::{learn_weights, load_weight_table, save_weight_table};
use tagmill_tfidf::generate_tags;
use tagmill_types::{Document, DocumentFeedback, DocumentTags, FeedbackStatus, RunSummary, WeightTable};

use crate::artifacts;
use crate::config::PipelineConfig;

/// Run the full three-stage pipeline and persist all three artifacts.
///
/// # Errors
///
/// Returns configuration errors before any processing, corpus errors for a
/// missing or empty documents folder, and persistence errors for any
/// artifact that cannot be written.
pub fn run_pipeline(config: &PipelineConfig) -> Result<RunSummary> {
    let started = Instant::now();
    config.validate()?;

    log::info!("Starting tagging pipeline");

    // Stage 1: generate tags, adjusted by the previous run's weights.
    let documents = load_corpus(config)?;
    let weights = load_weight_table(&config.weights_path())?;
    let tags = generate_tags(&documents, &weights, &config.generator_options());
    artifacts::write_json(&config.tags_path(), &tags)?;
    let tags_generated: usize = tags.iter().map(|t| t.tags.len()).sum();
    log::info!(
        "Generated {tags_generated} tags for {} documents",
        documents.len()
    );

    // Stage 2: simulated feedback.
    let feedback = review_tags(config, &documents, &tags)?;
    artifacts::write_json(&config.feedback_path(), &feedback)?;
    let (approved, rejected) = count_verdicts(&feedback);
    log::info!("Collected feedback for {} tags ({approved} approved)", approved + rejected);

    // Stage 3: learn weights for the next run.
    let learned = learn_weights(&feedback, &config.learning_buckets);
    save_weight_table(&learned, &config.weights_path())?;

    let summary = build_summary(&documents, tags_generated, approved, rejected, &learned, started);
    log::info!(
        "Pipeline complete: {} docs -> {} tags -> {:.1}% approved -> {} learned",
        summary.documents_processed,
        summary.tags_generated,
        summary.approval_rate_pct,
        summary.tags_learned
    );
    Ok(summary)
}

/// Stage 1 alone: generate tags and write `tags.json`.
///
/// # Errors
///
/// Same error surface as the generation stage of [`run_pipeline`].
pub fn run_generate(config: &PipelineConfig) -> Result<()> {
    config.validate()?;
    let documents = load_corpus(config)?;
    let weights = load_weight_table(&config.weights_path())?;
    let tags = generate_tags(&documents, &weights, &config.generator_options());
    artifacts::write_json(&config.tags_path(), &tags)
}

/// Stage 2 alone: read `tags.json`, review, write `feedback.json`.
///
/// # Errors
///
/// Fails when `tags.json` is missing — run the generate stage first.
pub fn run_feedback(config: &PipelineConfig) -> Result<()> {
    config.validate()?;
    let documents = load_corpus(config)?;
    let tags: Vec<DocumentTags> = artifacts::read_json(&config.tags_path())
        .context("no tags artifact; run `tagmill generate` first")?;
    let feedback = review_tags(config, &documents, &tags)?;
    artifacts::write_json(&config.feedback_path(), &feedback)
}

/// Stage 3 alone: read `feedback.json`, learn, write `tag_weights.json`.
///
/// # Errors
///
/// Fails when `feedback.json` is missing — run the feedback stage first.
pub fn run_learn(config: &PipelineConfig) -> Result<()> {
    config.validate()?;
    let feedback: Vec<DocumentFeedback> = artifacts::read_json(&config.feedback_path())
        .context("no feedback artifact; run `tagmill feedback` first")?;
    let learned = learn_weights(&feedback, &config.learning_buckets);
    save_weight_table(&learned, &config.weights_path())
}

fn load_corpus(config: &PipelineConfig) -> Result<Vec<Document>> {
    Ok(load_documents(
        &config.documents_folder,
        &CorpusOptions::default(),
    )?)
}

fn review_tags(
    config: &PipelineConfig,
    documents: &[Document],
    tags: &[DocumentTags],
) -> Result<Vec<DocumentFeedback>> {
    let reviewer = SimulatedReviewer::new(
        config.signal_weights()?,
        config.position_scores,
        config.approval_threshold,
    )?;
    Ok(synthesize_feedback(&reviewer, documents, tags))
}

fn count_verdicts(feedback: &[DocumentFeedback]) -> (usize, usize) {
    let mut approved = 0;
    let mut rejected = 0;
    for document in feedback {
        for record in &document.feedback {
            match record.status {
                FeedbackStatus::Approved => approved += 1,
                FeedbackStatus::Rejected => rejected += 1,
            }
        }
    }
    (approved, rejected)
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn build_summary(
    documents: &[Document],
    tags_generated: usize,
    approved: usize,
    rejected: usize,
    learned: &WeightTable,
    started: Instant,
) -> RunSummary {
    let total = approved + rejected;
    let approval_rate_pct = if total == 0 {
        0.0
    } else {
        approved as f64 / total as f64 * 100.0
    };

    RunSummary {
        documents_processed: documents.len(),
        tags_generated,
        approved_tags: approved,
        rejected_tags: rejected,
        approval_rate_pct,
        tags_learned: learned.len(),
        boosted_tags: learned.iter().filter(|(_, w)| **w > 1.0).count(),
        penalized_tags: learned.iter().filter(|(_, w)| **w < 1.0).count(),
        elapsed_ms: started.elapsed().as_millis() as u64,
        completed_at: Utc::now(),
    }
}
