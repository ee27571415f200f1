//! Detection-accuracy metrics per tool.

use crate::matching::MatchCounts;
use serde::{Deserialize, Serialize};

/// One output row: counts plus derived precision/recall/F1 for a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolScore {
    pub tool: String,
    pub tp: u32,
    pub fp: u32,
    #[serde(rename = "fn")]
    pub false_negatives: u32,
    pub total_findings: u32,
    pub groundtruth_total: u32,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

impl ToolScore {
    /// Derive the score row from one matching run. Zero denominators yield
    /// zero metrics; all three values are rounded to 4 decimal places.
    pub fn from_counts(
        tool: impl Into<String>,
        counts: MatchCounts,
        total_findings: usize,
        groundtruth_total: usize,
    ) -> Self {
        let tp = f64::from(counts.tp);
        let fp = f64::from(counts.fp);
        let false_neg = f64::from(counts.false_negatives);

        let precision = if tp + fp > 0.0 { tp / (tp + fp) } else { 0.0 };
        let recall = if tp + false_neg > 0.0 {
            tp / (tp + false_neg)
        } else {
            0.0
        };
        let f1_score = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Self {
            tool: tool.into(),
            tp: counts.tp,
            fp: counts.fp,
            false_negatives: counts.false_negatives,
            total_findings: total_findings as u32,
            groundtruth_total: groundtruth_total as u32,
            precision: round4(precision),
            recall: round4(recall),
            f1_score: round4(f1_score),
        }
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
