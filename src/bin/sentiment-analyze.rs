//! `sentiment-analyze`: print the sentiment of one text.
//!
//! ```text
//! $ sentiment-analyze "I love this product"
//! Sentiment: POSITIVE (Confidence: 1.00)
//! ```

use anyhow::{Context, Result};
use sentiment_pipeline::cli::{self, AnalyzeArgs, ANALYZE_USAGE};
use sentiment_pipeline::logging;

fn main() -> Result<()> {
    let args: AnalyzeArgs = cli::parse_or_exit(ANALYZE_USAGE);
    logging::init(&args.model.log_level);

    let pipeline = args
        .model
        .build_pipeline()
        .with_context(|| format!("Failed to load model '{}'", args.model.model))?;

    let prediction = pipeline.analyze(&args.text)?;
    println!(
        "Sentiment: {} (Confidence: {:.2})",
        prediction.label, prediction.score
    );
    Ok(())
}
