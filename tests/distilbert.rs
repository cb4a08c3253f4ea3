//! Integration tests against the real DistilBERT SST-2 model (downloads weights)
//! Run with: cargo test --features integration

#![cfg(feature = "integration")]

use std::sync::OnceLock;

use sentiment_pipeline::batch;
use sentiment_pipeline::sentiment::{
    SentimentAnalysisPipeline, SentimentAnalysisPipelineBuilder, SentimentDistilBert,
};

fn pipeline() -> &'static SentimentAnalysisPipeline<SentimentDistilBert> {
    static PIPELINE: OnceLock<SentimentAnalysisPipeline<SentimentDistilBert>> = OnceLock::new();
    PIPELINE.get_or_init(|| {
        SentimentAnalysisPipelineBuilder::default()
            .build()
            .expect("default model loads")
    })
}

fn assert_label(text: &str, expected: &str) -> anyhow::Result<()> {
    let prediction = pipeline().analyze(text)?;
    assert_eq!(prediction.label, expected, "label for {text:?}");
    assert!((0.0..=1.0).contains(&prediction.score));
    Ok(())
}

#[test]
fn positive_sentiment() -> anyhow::Result<()> {
    let prediction = pipeline().analyze("I love this product")?;
    assert_eq!(prediction.label, "POSITIVE");
    assert!(prediction.score > 0.5);
    Ok(())
}

#[test]
fn negative_sentiment() -> anyhow::Result<()> {
    let prediction = pipeline().analyze("This is the worst experience ever.")?;
    assert_eq!(prediction.label, "NEGATIVE");
    assert!(prediction.score > 0.5);
    Ok(())
}

#[test]
fn neutral_text_gets_a_binary_label() -> anyhow::Result<()> {
    for text in ["The product is okay.", "Meh, it's okay 😐"] {
        let prediction = pipeline().analyze(text)?;
        assert!(["POSITIVE", "NEGATIVE"].contains(&prediction.label.as_str()));
    }
    Ok(())
}

#[test]
fn labels_are_the_sst2_pair() {
    let mut labels = pipeline().labels();
    labels.sort();
    assert_eq!(labels, vec!["NEGATIVE", "POSITIVE"]);
}

#[test]
fn empty_input_errors() {
    let err = pipeline().analyze("").unwrap_err();
    assert!(err.to_string().contains("non-empty string"));
}

#[test]
fn emoji() -> anyhow::Result<()> {
    assert_label("I love this! ❤️", "POSITIVE")?;
    assert_label("This is terrible 😡", "NEGATIVE")
}

#[test]
fn mixed_language() -> anyhow::Result<()> {
    assert_label("I love this! मुझे यह पसंद है!", "POSITIVE")?;
    assert_label("यह बहुत खराब है! This is very bad!", "NEGATIVE")
}

#[test]
fn long_inputs_are_truncated_not_rejected() -> anyhow::Result<()> {
    assert_label(&"Great! ".repeat(100), "POSITIVE")?;
    assert_label(&"Terrible! ".repeat(100), "NEGATIVE")?;
    assert_label(&"This product is amazing! ".repeat(200), "POSITIVE")
}

#[test]
fn special_characters() -> anyhow::Result<()> {
    assert_label("This is great!!!", "POSITIVE")?;
    assert_label("This is terrible???", "NEGATIVE")?;
    assert_label("@user123 This is awesome!", "POSITIVE")?;
    assert_label("Check this out: https://example.com #cool", "POSITIVE")
}

#[test]
fn repeated_characters() -> anyhow::Result<()> {
    assert_label("This is soooooo good!", "POSITIVE")?;
    assert_label("I'm sooooooooo happy!", "POSITIVE")?;
    assert_label("This is baaaad!", "NEGATIVE")
}

#[test]
fn consistent_across_calls() -> anyhow::Result<()> {
    let text = "This is a test of consistency.";
    let first = pipeline().analyze(text)?;
    for _ in 0..4 {
        let again = pipeline().analyze(text)?;
        assert_eq!(again.label, first.label);
        assert!((again.score - first.score).abs() < 0.01);
    }
    Ok(())
}

#[test]
fn separate_instances() -> anyhow::Result<()> {
    let second: SentimentAnalysisPipeline<SentimentDistilBert> =
        SentimentAnalysisPipelineBuilder::default().build()?;
    assert_ne!(second.instance_id(), pipeline().instance_id());

    assert_eq!(pipeline().analyze("This is great!")?.label, "POSITIVE");
    assert_eq!(second.analyze("This is terrible!")?.label, "NEGATIVE");
    Ok(())
}

#[test]
fn batch_csv() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("reviews.csv");
    std::fs::write(&input, "text\nI love this!\nThis is terrible.\n")?;
    let output = dir.path().join("data").join("model_output.csv");

    let summary = batch::run(pipeline(), &input, &output)?;
    assert_eq!(summary.rows, 2);

    let rows: Vec<batch::OutputRecord> = csv::Reader::from_path(&output)?
        .deserialize()
        .collect::<Result<_, _>>()?;
    assert_eq!(rows[0].label, "POSITIVE");
    assert_eq!(rows[1].label, "NEGATIVE");
    Ok(())
}
