use std::collections::HashMap;

use candle_core::{DType, Device, IndexOp, Module, Tensor, D};
use candle_nn::{linear, ops::softmax, Linear};
use candle_transformers::models::distilbert::{Config, DistilBertModel};
use serde::Deserialize;
use tokenizers::Tokenizer;

use crate::error::{PipelineError, Result};
use crate::loaders::{load_weights, HfLoader, TokenizerLoader};
use crate::pipelines::sentiment::pipeline::Prediction;

/// Fields of `config.json` needed for the classification head.
#[derive(Deserialize)]
struct ClassifierConfigJson {
    dim: usize,
    #[serde(default = "default_max_position_embeddings")]
    max_position_embeddings: usize,
    #[serde(default)]
    id2label: HashMap<String, String>,
}

fn default_max_position_embeddings() -> usize {
    512
}

/// DistilBERT with a sequence-classification head (`DistilBertForSequenceClassification`).
///
/// Loaded from a hub repository or local directory containing `config.json`, weights, and
/// `tokenizer.json` or `vocab.txt`.
pub struct SentimentDistilBertModel {
    model: DistilBertModel,
    pre_classifier: Linear,
    classifier: Linear,
    tokenizer: Tokenizer,
    labels: Vec<String>,
    device: Device,
}

impl SentimentDistilBertModel {
    /// Download (or read) and load the model onto `device`.
    pub fn new(model_id: &str, device: Device) -> Result<Self> {
        let config_path = HfLoader::new(model_id, "config.json").load()?;
        let config_str = std::fs::read_to_string(&config_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        let class_cfg: ClassifierConfigJson = serde_json::from_str(&config_str)?;
        let labels = labels_by_id(&class_cfg.id2label)?;

        let vb = load_weights(model_id, &device)?;
        let model = DistilBertModel::load(vb.pp("distilbert"), &config)?;
        let pre_classifier = linear(class_cfg.dim, class_cfg.dim, vb.pp("pre_classifier"))?;
        let classifier = linear(class_cfg.dim, labels.len(), vb.pp("classifier"))?;

        let tokenizer = TokenizerLoader::new(model_id, class_cfg.max_position_embeddings).load()?;

        Ok(Self {
            model,
            pre_classifier,
            classifier,
            tokenizer,
            labels,
            device,
        })
    }

    /// Device the model runs on.
    pub fn device(&self) -> &Device {
        &self.device
    }

    fn logits(&self, text: &str) -> Result<Tensor> {
        let encoding = self.tokenizer.encode(text, true).map_err(|e| {
            PipelineError::Tokenization(format!(
                "Tokenization failed on '{}': {}",
                &text.chars().take(50).collect::<String>(),
                e
            ))
        })?;
        let ids = encoding.get_ids();

        let input_ids = Tensor::new(ids, &self.device)?.unsqueeze(0)?;
        // Non-zero entries are masked out; a single unpadded sequence masks nothing.
        let mask = Tensor::zeros((1, ids.len()), DType::U8, &self.device)?;

        let hidden = self.model.forward(&input_ids, &mask)?;
        let cls = hidden.i((.., 0))?;
        let pooled = self.pre_classifier.forward(&cls)?.relu()?;
        Ok(self.classifier.forward(&pooled)?)
    }

    /// Top label and its softmax probability.
    pub fn predict_with_score(&self, text: &str) -> Result<Prediction> {
        let logits = self.logits(text)?;
        let probs = softmax(&logits, D::Minus1)?.squeeze(0)?.to_vec1::<f32>()?;

        let (pred_id, score) = probs
            .iter()
            .copied()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .ok_or_else(|| PipelineError::Unexpected("Model returned no logits".into()))?;

        let label = self.labels.get(pred_id).cloned().ok_or_else(|| {
            PipelineError::Unexpected(format!(
                "Predicted label ID {} not in id2label. Available: {}",
                pred_id,
                self.labels.join(", ")
            ))
        })?;

        Ok(Prediction { label, score })
    }
}

impl crate::pipelines::sentiment::SentimentAnalysisModel for SentimentDistilBertModel {
    type Options = String;

    fn new(options: Self::Options, device: Device) -> Result<Self> {
        SentimentDistilBertModel::new(&options, device)
    }

    fn model_id(options: &Self::Options) -> String {
        options.clone()
    }

    fn predict_with_score(&self, text: &str) -> Result<Prediction> {
        self.predict_with_score(text)
    }

    fn labels(&self) -> Vec<String> {
        self.labels.clone()
    }

    fn device(&self) -> &Device {
        &self.device
    }
}

/// Order `id2label` by numeric id. Ids must be exactly `0..n`.
fn labels_by_id(id2label: &HashMap<String, String>) -> Result<Vec<String>> {
    if id2label.is_empty() {
        return Err(PipelineError::Initialization(
            "config.json has no id2label; not a sequence classifier".into(),
        ));
    }

    let mut by_id = id2label
        .iter()
        .map(|(id, label)| {
            id.parse::<usize>()
                .map(|id| (id, label.clone()))
                .map_err(|_| {
                    PipelineError::Initialization(format!("Invalid id2label key '{id}'"))
                })
        })
        .collect::<Result<Vec<_>>>()?;
    by_id.sort_by_key(|(id, _)| *id);

    if by_id.iter().enumerate().any(|(i, (id, _))| i != *id) {
        let ids: Vec<String> = by_id.iter().map(|(id, _)| id.to_string()).collect();
        return Err(PipelineError::Initialization(format!(
            "id2label ids must be 0..{}, got {}",
            by_id.len(),
            ids.join(", ")
        )));
    }

    Ok(by_id.into_iter().map(|(_, label)| label).collect())
}
