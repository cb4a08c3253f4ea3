//! CSV batch runner.
//!
//! Reads a CSV with a `text` column, analyzes every row in order, and writes
//! `text,label,score` rows to a new CSV. The run is all-or-nothing: any failure
//! (missing file, missing column, a row the model rejects) aborts before the output
//! file is created.
//!
//! ```rust,no_run
//! use sentiment_pipeline::batch;
//! use sentiment_pipeline::sentiment::SentimentAnalysisPipelineBuilder;
//!
//! # fn main() -> sentiment_pipeline::error::Result<()> {
//! let pipeline = SentimentAnalysisPipelineBuilder::default().build()?;
//! let summary = batch::run(&pipeline, "reviews.csv", "out/model_output.csv")?;
//! println!("{} rows in {:?}", summary.rows, summary.stats.total_time);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::pipelines::sentiment::{PipelineStats, SentimentAnalysisModel, SentimentAnalysisPipeline};

/// Name of the required input column.
pub const TEXT_COLUMN: &str = "text";

/// Where the batch CLI writes results unless told otherwise.
pub const DEFAULT_OUTPUT_PATH: &str = "tests/data/model_output.csv";

/// One output row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Input text, unchanged.
    pub text: String,
    /// Predicted label.
    pub label: String,
    /// Confidence of `label`.
    pub score: f32,
}

/// Outcome of a successful [`run`].
#[derive(Debug, Clone)]
pub struct BatchSummary {
    /// Number of data rows written.
    pub rows: usize,
    /// File the results were written to.
    pub output: PathBuf,
    /// Timing for the analysis of all rows.
    pub stats: PipelineStats,
}

/// Read the `text` column of the CSV at `path`, in row order.
///
/// Empty cells are returned as empty strings. Other columns are ignored.
///
/// # Errors
///
/// [`PipelineError::Io`] if the file cannot be opened or read, [`PipelineError::Format`]
/// if it is not valid CSV or has no `text` column.
pub fn read_texts(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        PipelineError::Io(format!("Failed to open '{}': {}", path.display(), e))
    })?;

    let column = reader
        .headers()?
        .iter()
        .position(|h| h.trim() == TEXT_COLUMN)
        .ok_or_else(|| {
            PipelineError::Format(format!(
                "'{}' has no '{}' column",
                path.display(),
                TEXT_COLUMN
            ))
        })?;

    reader
        .records()
        .map(|record| -> Result<String> {
            let record = record?;
            Ok(record.get(column).unwrap_or_default().to_string())
        })
        .collect()
}

/// Serialize records as CSV with a `text,label,score` header.
pub fn to_csv(records: &[OutputRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if records.is_empty() {
        writer.write_record(["text", "label", "score"])?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| PipelineError::Unexpected(format!("Failed to flush CSV buffer: {e}")))
}

/// Analyze every row of `input` with `pipeline` and write the results to `output`.
///
/// Rows are processed one at a time in input order. Nothing is written unless every
/// row succeeds. Parent directories of `output` are created as needed.
///
/// # Errors
///
/// Everything [`read_texts`] returns, the first error from
/// [`SentimentAnalysisPipeline::analyze`], and [`PipelineError::Io`] if the output
/// cannot be written.
pub fn run<M: SentimentAnalysisModel>(
    pipeline: &SentimentAnalysisPipeline<M>,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<BatchSummary> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let texts = read_texts(input)?;
    info!("Analyzing {} rows from {}", texts.len(), input.display());

    let timer = PipelineStats::start();
    let predictions = pipeline.analyze_all(&texts)?;
    let stats = timer.finish(predictions.len());

    let records: Vec<OutputRecord> = texts
        .into_iter()
        .zip(predictions)
        .map(|(text, prediction)| OutputRecord {
            text,
            label: prediction.label,
            score: prediction.score,
        })
        .collect();

    let bytes = to_csv(&records)?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            PipelineError::Io(format!("Failed to create '{}': {}", parent.display(), e))
        })?;
    }
    std::fs::write(output, bytes).map_err(|e| {
        PipelineError::Io(format!("Failed to write '{}': {}", output.display(), e))
    })?;

    info!(
        "Wrote {} rows to {} in {:.2}s",
        records.len(),
        output.display(),
        stats.total_time.as_secs_f64()
    );

    Ok(BatchSummary {
        rows: records.len(),
        output: output.to_path_buf(),
        stats,
    })
}
