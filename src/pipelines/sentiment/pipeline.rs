use super::model::SentimentAnalysisModel;
use crate::error::{PipelineError, Result};
use crate::pipelines::stats::{PipelineStats, StatsCounters};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::{debug, error};

/// Characters of input shown in debug logs.
const PREVIEW_CHARS: usize = 50;

// ============ Output types ============

/// A sentiment prediction with label and confidence score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// The predicted sentiment (e.g. "POSITIVE", "NEGATIVE").
    pub label: String,
    /// Confidence score (0.0 to 1.0).
    pub score: f32,
}

// ============ Pipeline ============

/// Classifies text sentiment with a loaded [`SentimentAnalysisModel`].
///
/// Construct with [`SentimentAnalysisPipelineBuilder`](super::SentimentAnalysisPipelineBuilder).
/// Each pipeline owns its model and carries its own instance id; pipelines never share
/// mutable state.
///
/// # Examples
///
/// ```rust,no_run
/// # use sentiment_pipeline::sentiment::SentimentAnalysisPipelineBuilder;
/// # fn main() -> sentiment_pipeline::error::Result<()> {
/// let pipeline = SentimentAnalysisPipelineBuilder::default().build()?;
///
/// let prediction = pipeline.analyze("I love this product!")?;
/// println!("{}: {:.2}", prediction.label, prediction.score);
/// # Ok(())
/// # }
/// ```
pub struct SentimentAnalysisPipeline<M: SentimentAnalysisModel> {
    pub(crate) model: M,
    pub(crate) instance_id: u64,
    pub(crate) model_id: String,
    pub(crate) span: tracing::Span,
    pub(crate) counters: StatsCounters,
}

impl<M: SentimentAnalysisModel> SentimentAnalysisPipeline<M> {
    /// Analyze the sentiment of one text.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Validation`] if `text` is empty. The model is not called.
    /// - [`PipelineError::Inference`] if the model fails or returns a score outside
    ///   `[0, 1]`. The model's message is kept as is. No retry is attempted.
    pub fn analyze(&self, text: &str) -> Result<Prediction> {
        let _entered = self.span.enter();

        if text.is_empty() {
            let err = PipelineError::empty_input();
            error!("{err}");
            return Err(err);
        }

        debug!("Analyzing text: '{}'", preview(text));

        let timer = PipelineStats::start();
        let prediction = self.model.predict_with_score(text).map_err(|e| {
            error!("Error during analysis: {e}");
            PipelineError::Inference(e.to_string())
        })?;
        let elapsed = timer.elapsed();

        if !(0.0..=1.0).contains(&prediction.score) {
            let err = PipelineError::Inference(format!(
                "Model returned score {} for label '{}', expected a value in [0, 1]",
                prediction.score, prediction.label
            ));
            error!("Error during analysis: {err}");
            return Err(err);
        }

        self.counters.record(elapsed);
        debug!(
            "Analysis completed in {:.2}ms - Label: {}, Score: {:.4}",
            elapsed.as_secs_f64() * 1000.0,
            prediction.label,
            prediction.score
        );

        Ok(prediction)
    }

    /// Analyze texts one at a time, in order. Stops at the first failure.
    pub fn analyze_all<I, S>(&self, texts: I) -> Result<Vec<Prediction>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        texts
            .into_iter()
            .map(|text| self.analyze(text.as_ref()))
            .collect()
    }

    /// Sequential id assigned when this pipeline was built.
    pub fn instance_id(&self) -> u64 {
        self.instance_id
    }

    /// Model this pipeline was built from.
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Labels the model can return.
    pub fn labels(&self) -> Vec<String> {
        self.model.labels()
    }

    /// Totals over every successful [`analyze`](Self::analyze) call so far.
    pub fn stats(&self) -> PipelineStats {
        self.counters.snapshot()
    }

    /// Returns the device (CPU/GPU) the model is running on.
    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }
}

impl<M: SentimentAnalysisModel> std::fmt::Debug for SentimentAnalysisPipeline<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentAnalysisPipeline")
            .field("instance_id", &self.instance_id)
            .field("model_id", &self.model_id)
            .field("device", &self.model.device().location())
            .finish()
    }
}

/// First [`PREVIEW_CHARS`] characters of `text`, with `...` appended when cut.
pub(crate) fn preview(text: &str) -> Cow<'_, str> {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}
