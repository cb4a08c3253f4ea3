//! `sentiment-batch`: analyze the `text` column of a CSV file.
//!
//! ```text
//! sentiment-batch reviews.csv
//! sentiment-batch reviews.csv --output results.csv --cuda 0
//! ```

use anyhow::{Context, Result};
use sentiment_pipeline::batch;
use sentiment_pipeline::cli::{self, BatchArgs, BATCH_USAGE};
use sentiment_pipeline::logging;

fn main() -> Result<()> {
    let args: BatchArgs = cli::parse_or_exit(BATCH_USAGE);
    logging::init(&args.model.log_level);

    let pipeline = args
        .model
        .build_pipeline()
        .with_context(|| format!("Failed to load model '{}'", args.model.model))?;

    let summary = batch::run(&pipeline, &args.input, &args.output)
        .with_context(|| format!("Batch run over '{}' failed", args.input.display()))?;

    println!("Results saved to {}", summary.output.display());
    Ok(())
}
