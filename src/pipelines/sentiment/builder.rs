use super::model::SentimentAnalysisModel;
use super::pipeline::SentimentAnalysisPipeline;
use crate::error::{PipelineError, Result};
use crate::pipelines::stats::{PipelineStats, StatsCounters};
use crate::pipelines::utils::StandardPipelineBuilder;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, info, info_span};

crate::pipelines::utils::impl_device_methods!(delegated: SentimentAnalysisPipelineBuilder<M: SentimentAnalysisModel>);

/// Hub repository of the model used when none is given.
pub const DEFAULT_MODEL_ID: &str = "distilbert/distilbert-base-uncased-finetuned-sst-2-english";

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

/// Hand out the next process-wide pipeline instance id (starting at 1).
pub fn next_instance_id() -> u64 {
    NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Builder for creating [`SentimentAnalysisPipeline`] instances.
///
/// Use [`Self::distilbert`] (or [`Default::default`] for [`DEFAULT_MODEL_ID`]) as the entry
/// point, or [`Self::new`] with the options of any [`SentimentAnalysisModel`].
///
/// # Examples
///
/// ```rust,no_run
/// # use sentiment_pipeline::sentiment::SentimentAnalysisPipelineBuilder;
/// # fn main() -> sentiment_pipeline::error::Result<()> {
/// let pipeline = SentimentAnalysisPipelineBuilder::distilbert(
///     "distilbert/distilbert-base-uncased-finetuned-sst-2-english",
/// )
/// .cuda(0)
/// .build()?;
/// # Ok(())
/// # }
/// ```
pub struct SentimentAnalysisPipelineBuilder<M: SentimentAnalysisModel>(
    StandardPipelineBuilder<M::Options>,
);

impl<M: SentimentAnalysisModel> SentimentAnalysisPipelineBuilder<M> {
    /// Creates a builder for a model loaded with `options`.
    pub fn new(options: M::Options) -> Self {
        Self(StandardPipelineBuilder::new(options))
    }

    /// Use a fixed instance id instead of drawing one from [`next_instance_id`].
    pub fn instance_id(mut self, id: u64) -> Self {
        self.0.instance_id = Some(id);
        self
    }

    /// Loads the model and builds the pipeline.
    ///
    /// Loading is done once here; the pipeline is then reused for any number of calls.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Device`] if the requested device is unavailable, and
    /// [`PipelineError::Initialization`] if the model cannot be loaded. Nothing is retried.
    pub fn build(self) -> Result<SentimentAnalysisPipeline<M>> {
        let StandardPipelineBuilder {
            options,
            device_request,
            instance_id,
        } = self.0;

        let instance_id = instance_id.unwrap_or_else(next_instance_id);
        let model_id = M::model_id(&options);
        let span = info_span!("sentiment", instance = instance_id, model = %model_id);
        let _entered = span.enter();

        let timer = PipelineStats::start();
        info!("Initializing sentiment pipeline with {model_id} on {device_request}");

        let device = device_request.resolve().inspect_err(|e| {
            error!("Failed to initialize device: {e}");
        })?;

        debug!("Loading model...");
        let model = M::new(options, device).map_err(|e| {
            error!("Failed to load model: {e}");
            match e {
                PipelineError::Initialization(_) | PipelineError::Device(_) => e,
                other => PipelineError::Initialization(format!(
                    "Failed to load model '{model_id}': {other}"
                )),
            }
        })?;

        info!(
            "Successfully loaded model: {model_id} in {:.2}s",
            timer.elapsed().as_secs_f64()
        );

        drop(_entered);
        let pipeline = SentimentAnalysisPipeline {
            model,
            instance_id,
            model_id,
            span,
            counters: StatsCounters::default(),
        };
        debug!(parent: &pipeline.span, "Model instance details: {pipeline:?}");

        Ok(pipeline)
    }
}

impl SentimentAnalysisPipelineBuilder<super::SentimentDistilBert> {
    /// Creates a builder for a DistilBERT sequence classifier hosted on the Hugging Face hub.
    pub fn distilbert(model_id: impl Into<String>) -> Self {
        Self::new(model_id.into())
    }
}

impl Default for SentimentAnalysisPipelineBuilder<super::SentimentDistilBert> {
    fn default() -> Self {
        Self::distilbert(DEFAULT_MODEL_ID)
    }
}
