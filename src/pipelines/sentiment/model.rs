use super::pipeline::Prediction;
use crate::error::Result;

/// A text classifier the sentiment pipeline delegates to.
///
/// Implementations own everything needed for inference (weights, tokenizer, device).
/// The pipeline validates input before calling [`predict_with_score`](Self::predict_with_score)
/// and never calls it with an empty string.
pub trait SentimentAnalysisModel {
    /// Load-time options, e.g. a hub repository id.
    type Options: std::fmt::Debug + Clone;

    /// Load the model onto `device`.
    fn new(options: Self::Options, device: candle_core::Device) -> Result<Self>
    where
        Self: Sized;

    /// Name recorded in logs and reported by the pipeline.
    fn model_id(options: &Self::Options) -> String;

    /// Classify one text, returning the top label and its probability.
    fn predict_with_score(&self, text: &str) -> Result<Prediction>;

    /// The closed set of labels this model can return.
    fn labels(&self) -> Vec<String>;

    /// Device the model runs on.
    fn device(&self) -> &candle_core::Device;
}
