//! Weight derivation from feedback history.

use std::collections::BTreeMap;

use tagmill_types::{DocumentFeedback, FeedbackStatus, WeightTable};

use crate::buckets::LearningBuckets;

/// Approval counters for one tag across a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagStats {
    /// Number of approvals.
    pub approved: usize,
    /// Number of rejections.
    pub rejected: usize,
}

impl TagStats {
    /// Fraction of approvals, 0.0 when the tag has no feedback.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn approval_rate(self) -> f64 {
        let total = self.approved + self.rejected;
        if total == 0 {
            return 0.0;
        }
        self.approved as f64 / total as f64
    }
}

/// Aggregate feedback by lowercased tag across all documents in a run.
#[must_use]
pub fn approval_stats(feedback: &[DocumentFeedback]) -> BTreeMap<String, TagStats> {
    let mut stats: BTreeMap<String, TagStats> = BTreeMap::new();
    for document in feedback {
        for record in &document.feedback {
            let entry = stats.entry(record.tag.to_lowercase()).or_default();
            match record.status {
                FeedbackStatus::Approved => entry.approved += 1,
                FeedbackStatus::Rejected => entry.rejected += 1,
            }
        }
    }
    stats
}

/// Derive the weight table for every tag that appeared in this run's
/// feedback.
///
/// The result covers exactly the tags with feedback; everything else keeps
/// the implicit default of 1.0. The table is a full recomputation from the
/// current run — it replaces, not merges with, any previously persisted
/// table.
#[must_use]
pub fn learn_weights(feedback: &[DocumentFeedback], buckets: &LearningBuckets) -> WeightTable {
    let table: WeightTable = approval_stats(feedback)
        .into_iter()
        .map(|(tag, stats)| (tag, buckets.weight_for(stats.approval_rate())))
        .collect();
    log::info!("Learned weights for {} tags", table.len());
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagmill_types::FeedbackRecord;

    fn feedback(filename: &str, records: &[(&str, FeedbackStatus)]) -> DocumentFeedback {
        DocumentFeedback {
            filename: filename.to_string(),
            feedback: records
                .iter()
                .map(|(tag, status)| FeedbackRecord {
                    tag: (*tag).to_string(),
                    status: *status,
                    relevance_score: 0.5,
                })
                .collect(),
        }
    }

    #[test]
    fn test_stats_aggregate_across_documents() {
        let runs = vec![
            feedback("a.txt", &[("rust", FeedbackStatus::Approved)]),
            feedback("b.txt", &[("rust", FeedbackStatus::Rejected)]),
        ];
        let stats = approval_stats(&runs);
        assert_eq!(
            stats.get("rust"),
            Some(&TagStats {
                approved: 1,
                rejected: 1
            })
        );
    }

    #[test]
    fn test_stats_fold_case() {
        let runs = vec![feedback(
            "a.txt",
            &[
                ("Rust", FeedbackStatus::Approved),
                ("rust", FeedbackStatus::Approved),
            ],
        )];
        let stats = approval_stats(&runs);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats.get("rust").map(|s| s.approved), Some(2));
    }

    #[test]
    fn test_eighty_percent_approval_gets_strong_boost() {
        // 4 approvals, 1 rejection: approval rate 0.8 exactly.
        let runs = vec![
            feedback("a.txt", &[("neural", FeedbackStatus::Approved)]),
            feedback("b.txt", &[("neural", FeedbackStatus::Approved)]),
            feedback("c.txt", &[("neural", FeedbackStatus::Approved)]),
            feedback("d.txt", &[("neural", FeedbackStatus::Approved)]),
            feedback("e.txt", &[("neural", FeedbackStatus::Rejected)]),
        ];
        let table = learn_weights(&runs, &LearningBuckets::default());
        assert!((table.get("neural") - 1.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_all_rejected_gets_strong_penalty() {
        let runs = vec![feedback(
            "a.txt",
            &[
                ("noise", FeedbackStatus::Rejected),
                ("noise", FeedbackStatus::Rejected),
            ],
        )];
        let table = learn_weights(&runs, &LearningBuckets::default());
        assert!((table.get("noise") - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unseen_tag_defaults_to_one() {
        let table = learn_weights(&[], &LearningBuckets::default());
        assert!(table.is_empty());
        assert!((table.get("anything") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_table_covers_every_tag_seen() {
        let runs = vec![feedback(
            "a.txt",
            &[
                ("alpha", FeedbackStatus::Approved),
                ("beta", FeedbackStatus::Rejected),
            ],
        )];
        let table = learn_weights(&runs, &LearningBuckets::default());
        assert_eq!(table.len(), 2);
    }
}
