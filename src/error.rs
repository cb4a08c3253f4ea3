//! Error types for this crate.
//!
//! All fallible operations return [`Result<T>`] which uses [`PipelineError`] as the error type.

use thiserror::Error;

/// A [`Result`](std::result::Result) alias using [`PipelineError`] as the error type.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Message carried by [`PipelineError::Validation`] for empty input.
pub const EMPTY_INPUT_MESSAGE: &str = "Input text must be a non-empty string.";

/// The unified error type for all crate errors.
///
/// # Example
///
/// ```rust,no_run
/// use sentiment_pipeline::error::PipelineError;
///
/// fn handle_error(e: PipelineError) {
///     match &e {
///         PipelineError::Initialization(_) => {
///             // Model could not be loaded - check network or model id
///         }
///         PipelineError::Validation(_) => {
///             // Bad input - fix and resubmit
///         }
///         PipelineError::Inference(_) => {
///             // Model failed on valid input
///             eprintln!("Inference failed: {e}");
///         }
///         PipelineError::Io(_) | PipelineError::Format(_) => {
///             // Batch input/output problem
///         }
///         _ => {
///             // Future error variants
///         }
///     }
/// }
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PipelineError {
    /// Model, tokenizer or weights could not be loaded. Not retried.
    #[error("{0}")]
    Initialization(String),

    /// Device initialization failure. Fall back to CPU.
    #[error("{0}")]
    Device(String),

    /// Caller-supplied text was rejected before reaching the model.
    #[error("{0}")]
    Validation(String),

    /// The model failed on otherwise valid input. Carries the model's message unchanged.
    #[error("{0}")]
    Inference(String),

    /// Tokenization failure inside a model.
    #[error("{0}")]
    Tokenization(String),

    /// File missing, unreadable or unwritable.
    #[error("{0}")]
    Io(String),

    /// Tabular input is malformed or lacks a required column.
    #[error("{0}")]
    Format(String),

    /// Internal error. Report if seen.
    #[error("{0}")]
    Unexpected(String),
}

impl PipelineError {
    /// Rejection for empty input text.
    pub(crate) fn empty_input() -> Self {
        PipelineError::Validation(EMPTY_INPUT_MESSAGE.to_string())
    }
}

impl From<hf_hub::api::sync::ApiError> for PipelineError {
    fn from(value: hf_hub::api::sync::ApiError) -> Self {
        PipelineError::Initialization(format!("HuggingFace API error: {}", value))
    }
}

impl From<candle_core::Error> for PipelineError {
    fn from(value: candle_core::Error) -> Self {
        PipelineError::Unexpected(value.to_string())
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(value: std::io::Error) -> Self {
        PipelineError::Io(value.to_string())
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(value: serde_json::Error) -> Self {
        PipelineError::Unexpected(value.to_string())
    }
}

impl From<csv::Error> for PipelineError {
    fn from(value: csv::Error) -> Self {
        if value.is_io_error() {
            PipelineError::Io(value.to_string())
        } else {
            PipelineError::Format(value.to_string())
        }
    }
}
