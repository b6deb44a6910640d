//! End-to-end tests for the batch pipeline over a temp-dir corpus.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use tagmill_cli::config::PipelineConfig;
use tagmill_cli::pipeline::{run_feedback, run_generate, run_learn, run_pipeline};
use tagmill_types::{DocumentFeedback, DocumentTags, FeedbackStatus, WeightTable};

fn write_doc(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn test_config(documents: &Path, output: &Path) -> PipelineConfig {
    PipelineConfig {
        documents_folder: documents.to_path_buf(),
        output_dir: output.to_path_buf(),
        top_k: 3,
        ..PipelineConfig::default()
    }
}

fn seed_corpus(dir: &Path) {
    write_doc(
        dir,
        "ml.txt",
        "Machine Learning Basics\n\nmachine learning machine learning neural networks \
         with training data and deep models used in practice",
    );
    write_doc(
        dir,
        "db.txt",
        "Database Systems\n\ndatabases store records and indexes for fast query \
         processing across large workloads",
    );
}

#[test]
fn test_full_run_produces_all_three_artifacts() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("documents");
    fs::create_dir(&docs).unwrap();
    seed_corpus(&docs);

    let config = test_config(&docs, &temp.path().join("outputs"));
    let summary = run_pipeline(&config).unwrap();

    assert!(config.tags_path().exists());
    assert!(config.feedback_path().exists());
    assert!(config.weights_path().exists());

    assert_eq!(summary.documents_processed, 2);
    assert!(summary.tags_generated > 0);
    assert_eq!(
        summary.tags_generated,
        summary.approved_tags + summary.rejected_tags
    );
}

#[test]
fn test_tags_artifact_shape_and_ordering() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("documents");
    fs::create_dir(&docs).unwrap();
    seed_corpus(&docs);

    let config = test_config(&docs, &temp.path().join("outputs"));
    run_pipeline(&config).unwrap();

    let tags: Vec<DocumentTags> =
        serde_json::from_str(&fs::read_to_string(config.tags_path()).unwrap()).unwrap();

    // Output order is by filename, not completion order.
    let names: Vec<&str> = tags.iter().map(|t| t.filename.as_str()).collect();
    assert_eq!(names, vec!["db.txt", "ml.txt"]);

    for doc_tags in &tags {
        assert!(doc_tags.tags.len() <= 3);
        for pair in doc_tags.tags.windows(2) {
            assert!(pair[0].adjusted_score >= pair[1].adjusted_score);
        }
        for tag in &doc_tags.tags {
            assert!(tag.raw_score >= 0.0);
            assert!(tag.adjusted_score >= 0.0);
        }
    }

    // Stemmed frequency leaders from the ML document.
    let ml = tags.iter().find(|t| t.filename == "ml.txt").unwrap();
    let top_two: Vec<&str> = ml.tags[..2].iter().map(|t| t.tag.as_str()).collect();
    assert!(top_two.contains(&"machin"));
    assert!(top_two.contains(&"learn"));
}

#[test]
fn test_feedback_artifact_matches_threshold() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("documents");
    fs::create_dir(&docs).unwrap();
    seed_corpus(&docs);

    let config = test_config(&docs, &temp.path().join("outputs"));
    run_pipeline(&config).unwrap();

    let feedback: Vec<DocumentFeedback> =
        serde_json::from_str(&fs::read_to_string(config.feedback_path()).unwrap()).unwrap();

    assert_eq!(feedback.len(), 2);
    for document in &feedback {
        for record in &document.feedback {
            let expected = record.relevance_score >= config.approval_threshold;
            assert_eq!(record.status == FeedbackStatus::Approved, expected);
        }
    }
}

#[test]
fn test_learned_weights_come_from_the_bucket_table() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("documents");
    fs::create_dir(&docs).unwrap();
    seed_corpus(&docs);

    let config = test_config(&docs, &temp.path().join("outputs"));
    run_pipeline(&config).unwrap();

    let weights: WeightTable =
        serde_json::from_str(&fs::read_to_string(config.weights_path()).unwrap()).unwrap();
    assert!(!weights.is_empty());
    for (_, weight) in weights.iter() {
        let allowed = [1.3, 1.1, 0.8, 0.5];
        assert!(allowed.iter().any(|w| (w - weight).abs() < f64::EPSILON));
    }
}

#[test]
fn test_second_run_applies_learned_weights() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("documents");
    fs::create_dir(&docs).unwrap();
    seed_corpus(&docs);

    let config = test_config(&docs, &temp.path().join("outputs"));
    run_pipeline(&config).unwrap();

    let learned: WeightTable =
        serde_json::from_str(&fs::read_to_string(config.weights_path()).unwrap()).unwrap();

    // Second invocation reads the persisted table back in.
    run_pipeline(&config).unwrap();
    let tags: Vec<DocumentTags> =
        serde_json::from_str(&fs::read_to_string(config.tags_path()).unwrap()).unwrap();

    let mut checked = 0;
    for doc_tags in &tags {
        for tag in &doc_tags.tags {
            let expected = tag.raw_score * learned.get(&tag.tag);
            assert!((tag.adjusted_score - expected).abs() < 1e-12);
            if (learned.get(&tag.tag) - 1.0).abs() > f64::EPSILON {
                checked += 1;
            }
        }
    }
    // At least one tag must actually have been re-weighted.
    assert!(checked > 0);
}

#[test]
fn test_staged_commands_match_full_run() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("documents");
    fs::create_dir(&docs).unwrap();
    seed_corpus(&docs);

    let staged = test_config(&docs, &temp.path().join("staged"));
    run_generate(&staged).unwrap();
    run_feedback(&staged).unwrap();
    run_learn(&staged).unwrap();

    let full = test_config(&docs, &temp.path().join("full"));
    run_pipeline(&full).unwrap();

    let staged_weights: WeightTable =
        serde_json::from_str(&fs::read_to_string(staged.weights_path()).unwrap()).unwrap();
    let full_weights: WeightTable =
        serde_json::from_str(&fs::read_to_string(full.weights_path()).unwrap()).unwrap();
    assert_eq!(staged_weights, full_weights);
}

#[test]
fn test_empty_documents_folder_is_configuration_error() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("documents");
    fs::create_dir(&docs).unwrap();

    let config = test_config(&docs, &temp.path().join("outputs"));
    let err = run_pipeline(&config).unwrap_err();
    assert!(err.to_string().contains("No documents found"));
    assert!(!config.tags_path().exists());
}

#[test]
fn test_missing_documents_folder_is_configuration_error() {
    let temp = TempDir::new().unwrap();
    let config = test_config(&temp.path().join("nope"), &temp.path().join("outputs"));
    let err = run_pipeline(&config).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_invalid_signal_weights_fail_before_processing() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("documents");
    fs::create_dir(&docs).unwrap();
    seed_corpus(&docs);

    let config = PipelineConfig {
        tfidf_weight: 0.5,
        frequency_weight: 0.2,
        position_weight: 0.2,
        ..test_config(&docs, &temp.path().join("outputs"))
    };
    let err = run_pipeline(&config).unwrap_err();
    assert!(err.to_string().contains("sum to 1.0"));
    assert!(!config.tags_path().exists());
}

#[test]
fn test_feedback_stage_requires_tags_artifact() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("documents");
    fs::create_dir(&docs).unwrap();
    seed_corpus(&docs);

    let config = test_config(&docs, &temp.path().join("outputs"));
    let err = run_feedback(&config).unwrap_err();
    assert!(err.to_string().contains("tagmill generate"));
}

#[test]
fn test_yaml_config_round_trip() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("documents");
    fs::create_dir(&docs).unwrap();
    seed_corpus(&docs);

    let config_path: PathBuf = temp.path().join("tagmill.yaml");
    fs::write(
        &config_path,
        format!(
            "documents_folder: {}\noutput_dir: {}\ntop_k: 2\n",
            docs.display(),
            temp.path().join("outputs").display()
        ),
    )
    .unwrap();

    let config = PipelineConfig::load(Some(&config_path)).unwrap();
    assert_eq!(config.top_k, 2);
    run_pipeline(&config).unwrap();

    let tags: Vec<DocumentTags> =
        serde_json::from_str(&fs::read_to_string(config.tags_path()).unwrap()).unwrap();
    for doc_tags in &tags {
        assert!(doc_tags.tags.len() <= 2);
    }
}
