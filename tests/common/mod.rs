//! Stand-in models for exercising the pipeline without downloading weights.

#![allow(dead_code)]

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use candle_core::Device;
use sentiment_pipeline::error::{PipelineError, Result};
use sentiment_pipeline::sentiment::{
    Prediction, SentimentAnalysisModel, SentimentAnalysisPipeline,
    SentimentAnalysisPipelineBuilder,
};

pub const POSITIVE: &str = "POSITIVE";
pub const NEGATIVE: &str = "NEGATIVE";

const POSITIVE_WORDS: &[&str] = &["love", "great", "fantastic", "amazing", "awesome", "good"];
const NEGATIVE_WORDS: &[&str] = &["worst", "terrible", "awful", "hate", "bad", "waste"];

/// Counts how often the model was asked to predict.
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// What a [`ScriptedModel`] does when asked to predict.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Keyword lookup: negative words win, then positive words, else a lukewarm POSITIVE.
    Keywords,
    /// Fail every call with this message.
    FailWith(String),
    /// Fail calls whose text contains the marker, keywords otherwise.
    FailOn(String),
    /// Return this score with the POSITIVE label.
    FixedScore(f32),
}

#[derive(Debug, Clone)]
pub struct ScriptedOptions {
    pub name: String,
    pub behavior: Behavior,
    pub calls: CallCounter,
    /// Make `new` fail with this message.
    pub load_error: Option<String>,
}

impl ScriptedOptions {
    pub fn keywords() -> Self {
        Self::with(Behavior::Keywords)
    }

    pub fn with(behavior: Behavior) -> Self {
        Self {
            name: "scripted-sst2".into(),
            behavior,
            calls: CallCounter::default(),
            load_error: None,
        }
    }
}

pub struct ScriptedModel {
    behavior: Behavior,
    calls: CallCounter,
    device: Device,
}

impl SentimentAnalysisModel for ScriptedModel {
    type Options = ScriptedOptions;

    fn new(options: Self::Options, device: Device) -> Result<Self> {
        if let Some(reason) = options.load_error {
            return Err(PipelineError::Unexpected(reason));
        }
        Ok(Self {
            behavior: options.behavior,
            calls: options.calls,
            device,
        })
    }

    fn model_id(options: &Self::Options) -> String {
        options.name.clone()
    }

    fn predict_with_score(&self, text: &str) -> Result<Prediction> {
        self.calls.bump();
        match &self.behavior {
            Behavior::Keywords => Ok(keyword_prediction(text)),
            Behavior::FailWith(message) => Err(PipelineError::Unexpected(message.clone())),
            Behavior::FailOn(marker) if text.contains(marker.as_str()) => {
                Err(PipelineError::Tokenization(format!("cannot tokenize '{text}'")))
            }
            Behavior::FailOn(_) => Ok(keyword_prediction(text)),
            Behavior::FixedScore(score) => Ok(Prediction {
                label: POSITIVE.into(),
                score: *score,
            }),
        }
    }

    fn labels(&self) -> Vec<String> {
        vec![NEGATIVE.into(), POSITIVE.into()]
    }

    fn device(&self) -> &Device {
        &self.device
    }
}

pub fn keyword_prediction(text: &str) -> Prediction {
    let lower = text.to_lowercase();
    let hit = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    let (label, score) = if hit(NEGATIVE_WORDS) {
        (NEGATIVE, 0.99)
    } else if hit(POSITIVE_WORDS) {
        (POSITIVE, 0.99)
    } else {
        (POSITIVE, 0.5)
    };

    Prediction {
        label: label.into(),
        score,
    }
}

pub fn build(options: ScriptedOptions) -> SentimentAnalysisPipeline<ScriptedModel> {
    SentimentAnalysisPipelineBuilder::<ScriptedModel>::new(options)
        .build()
        .expect("scripted model always loads")
}

pub fn keyword_pipeline() -> SentimentAnalysisPipeline<ScriptedModel> {
    build(ScriptedOptions::keywords())
}

/// Run `f` with debug-level logging on this thread captured into a string.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let sink = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || LogSink(sink.clone()))
        .finish();

    let out = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
    (out, logs)
}

struct LogSink(Arc<Mutex<Vec<u8>>>);

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
