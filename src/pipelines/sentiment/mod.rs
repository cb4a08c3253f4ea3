//! Sentiment analysis pipeline.
//!
//! Classify text as `POSITIVE` or `NEGATIVE` (or whatever labels the loaded model defines).
//! Returns both the predicted label and a confidence score.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sentiment_pipeline::sentiment::SentimentAnalysisPipelineBuilder;
//!
//! # fn main() -> sentiment_pipeline::error::Result<()> {
//! let pipeline = SentimentAnalysisPipelineBuilder::default().build()?;
//!
//! let prediction = pipeline.analyze("I absolutely love this product!")?;
//! println!("sentiment: {} (confidence: {:.2})", prediction.label, prediction.score);
//! # Ok(())
//! # }
//! ```
//!
//! # Input validation
//!
//! Empty text is rejected with [`PipelineError::Validation`](crate::error::PipelineError::Validation)
//! before the model is called:
//!
//! ```rust,no_run
//! # use sentiment_pipeline::sentiment::SentimentAnalysisPipelineBuilder;
//! # use sentiment_pipeline::error::PipelineError;
//! # fn main() -> sentiment_pipeline::error::Result<()> {
//! # let pipeline = SentimentAnalysisPipelineBuilder::default().build()?;
//! let err = pipeline.analyze("").unwrap_err();
//! assert!(matches!(err, PipelineError::Validation(_)));
//! # Ok(())
//! # }
//! ```
//!
//! # Custom models
//!
//! Anything implementing [`SentimentAnalysisModel`] can back a pipeline via
//! [`SentimentAnalysisPipelineBuilder::new`].
//!
//! # Supported Models
//!
//! | Model | Builder Method |
//! |-------|----------------|
//! | DistilBERT sequence classifiers (default: SST-2) | [`SentimentAnalysisPipelineBuilder::distilbert`] |

// ============ Internal API ============

pub(crate) mod builder;
pub(crate) mod model;
pub(crate) mod pipeline;

// ============ Public API ============

pub use crate::pipelines::stats::PipelineStats;
pub use crate::pipelines::utils::DeviceRequest;
pub use builder::{next_instance_id, SentimentAnalysisPipelineBuilder, DEFAULT_MODEL_ID};
pub use model::SentimentAnalysisModel;
pub use pipeline::{Prediction, SentimentAnalysisPipeline};

/// Only for generic annotations. Use [`SentimentAnalysisPipelineBuilder::distilbert`].
pub type SentimentDistilBert = crate::models::SentimentDistilBertModel;
