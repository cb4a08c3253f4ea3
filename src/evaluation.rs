//! Accuracy checks over labeled samples.
//!
//! Runs a pipeline over `(text, expected label)` pairs and tallies hits per label.
//! Expected labels are compared case-insensitively, so a dataset labeled
//! `positive`/`negative` can be scored against a model that answers
//! `POSITIVE`/`NEGATIVE`. Samples whose expected label the model cannot produce at all
//! (e.g. `neutral` for a binary model) are counted as skipped, not wrong.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::pipelines::sentiment::{PipelineStats, SentimentAnalysisModel, SentimentAnalysisPipeline};

/// A text with the label it should receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledText {
    /// Input text.
    pub text: String,
    /// Expected label.
    pub label: String,
}

impl LabeledText {
    /// Pair `text` with its expected `label`.
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// Per-label tallies, keyed by the model's label spelling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelCounts {
    /// Samples expected to get this label.
    pub expected: usize,
    /// Samples the model gave this label.
    pub predicted: usize,
    /// Samples expected and predicted as this label.
    pub correct: usize,
}

/// Result of [`evaluate`].
#[derive(Debug, Clone)]
pub struct EvaluationReport {
    /// Samples scored (excludes skipped).
    pub total: usize,
    /// Samples whose prediction matched the expected label.
    pub correct: usize,
    /// Samples whose expected label is outside the model's label set.
    pub skipped: usize,
    /// Tallies per model label.
    pub per_label: BTreeMap<String, LabelCounts>,
    /// Mean confidence over scored samples.
    pub mean_score: f32,
    /// Timing of the scored samples.
    pub stats: PipelineStats,
}

impl EvaluationReport {
    /// `correct / total`, or 0 when nothing was scored.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// Score `pipeline` against `samples`.
///
/// # Errors
///
/// Stops at the first error from [`SentimentAnalysisPipeline::analyze`].
pub fn evaluate<M: SentimentAnalysisModel>(
    pipeline: &SentimentAnalysisPipeline<M>,
    samples: &[LabeledText],
) -> Result<EvaluationReport> {
    let labels = pipeline.labels();
    let mut per_label: BTreeMap<String, LabelCounts> = labels
        .iter()
        .map(|l| (l.clone(), LabelCounts::default()))
        .collect();

    let timer = PipelineStats::start();
    let (mut total, mut correct, mut skipped) = (0, 0, 0);
    let mut score_sum = 0.0f64;

    for sample in samples {
        let Some(expected) = labels.iter().find(|l| l.eq_ignore_ascii_case(&sample.label))
        else {
            skipped += 1;
            continue;
        };

        let prediction = pipeline.analyze(&sample.text)?;
        total += 1;
        score_sum += f64::from(prediction.score);

        per_label.entry(expected.clone()).or_default().expected += 1;
        let predicted = per_label.entry(prediction.label.clone()).or_default();
        predicted.predicted += 1;
        if prediction.label == *expected {
            predicted.correct += 1;
            correct += 1;
        }
    }

    let report = EvaluationReport {
        total,
        correct,
        skipped,
        per_label,
        mean_score: if total == 0 {
            0.0
        } else {
            (score_sum / total as f64) as f32
        },
        stats: timer.finish(total),
    };

    info!(
        "Evaluated {} samples ({} skipped): accuracy {:.3}, mean score {:.3}",
        report.total,
        report.skipped,
        report.accuracy(),
        report.mean_score
    );

    Ok(report)
}
