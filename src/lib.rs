//! Local sentiment analysis in Rust.
//!
//! Powered by [Candle](https://github.com/huggingface/candle): loads a pre-trained
//! sequence classifier (DistilBERT fine-tuned on SST-2 by default) and wraps it in a
//! pipeline that validates input, logs every call, and returns a label with a
//! confidence score. A CSV batch runner and an accuracy check are built on top.
//!
//! ```rust,no_run
//! use sentiment_pipeline::sentiment::SentimentAnalysisPipelineBuilder;
//!
//! # fn main() -> sentiment_pipeline::error::Result<()> {
//! let pipeline = SentimentAnalysisPipelineBuilder::default().build()?;
//! let prediction = pipeline.analyze("I love this product")?;
//! assert_eq!(prediction.label, "POSITIVE");
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

// ============ Internal API ============

pub(crate) mod loaders;
pub(crate) mod models;
pub(crate) mod pipelines;

// ============ Public API ============

pub mod batch;
pub mod cli;
pub mod error;
pub mod evaluation;
pub mod logging;

pub use pipelines::sentiment;
