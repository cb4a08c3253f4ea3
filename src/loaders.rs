//! Model file loading from the Hugging Face hub or a local directory.
//!
//! A model id that names an existing directory is read from disk; anything else is
//! treated as a hub repository and fetched through the `hf-hub` cache.

use std::path::{Path, PathBuf};

use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use hf_hub::api::sync::Api;
use tokenizers::models::wordpiece::WordPiece;
use tokenizers::normalizers::BertNormalizer;
use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
use tokenizers::processors::bert::BertProcessing;
use tokenizers::{Model, Tokenizer, TruncationParams};
use tracing::debug;

use crate::error::{PipelineError, Result};

#[derive(Debug, Clone)]
pub struct HfLoader {
    pub repo: String,
    pub filename: String,
}

impl HfLoader {
    pub fn new(repo: &str, filename: &str) -> Self {
        Self {
            repo: repo.into(),
            filename: filename.into(),
        }
    }

    pub fn load(&self) -> Result<PathBuf> {
        let local = Path::new(&self.repo);
        if local.is_dir() {
            let path = local.join(&self.filename);
            return if path.is_file() {
                Ok(path)
            } else {
                Err(PipelineError::Initialization(format!(
                    "'{}' not found in local model directory '{}'",
                    self.filename, self.repo
                )))
            };
        }

        let api = Api::new()?;
        let path = api.model(self.repo.clone()).get(&self.filename).map_err(|e| {
            PipelineError::Initialization(format!(
                "Failed to download '{}' from '{}': {}",
                self.filename, self.repo, e
            ))
        })?;
        debug!("Resolved {} to {}", self.filename, path.display());
        Ok(path)
    }
}

/// Loads a BERT-style tokenizer, from `tokenizer.json` when the repo has one and from
/// `vocab.txt` otherwise.
#[derive(Debug, Clone)]
pub struct TokenizerLoader {
    pub repo: String,
    pub max_length: usize,
}

impl TokenizerLoader {
    pub fn new(repo: &str, max_length: usize) -> Self {
        Self {
            repo: repo.into(),
            max_length,
        }
    }

    pub fn load(&self) -> Result<Tokenizer> {
        let mut tokenizer = match HfLoader::new(&self.repo, "tokenizer.json").load() {
            Ok(path) => Tokenizer::from_file(&path).map_err(|e| {
                PipelineError::Initialization(format!(
                    "Failed to load tokenizer from '{}': {}",
                    path.display(),
                    e
                ))
            })?,
            Err(e) => {
                debug!("No usable tokenizer.json in '{}' ({e}), falling back to vocab.txt", self.repo);
                let vocab = HfLoader::new(&self.repo, "vocab.txt").load()?;
                wordpiece_tokenizer(&vocab)?
            }
        };

        let truncation = TruncationParams {
            max_length: self.max_length,
            ..Default::default()
        };
        tokenizer
            .with_truncation(Some(truncation))
            .map_err(|e| PipelineError::Initialization(format!("Invalid truncation: {e}")))?;
        tokenizer.with_padding(None);

        Ok(tokenizer)
    }
}

/// Uncased BERT WordPiece tokenizer built from a `vocab.txt` file.
fn wordpiece_tokenizer(vocab: &Path) -> Result<Tokenizer> {
    let vocab_str = vocab.display().to_string();
    let wordpiece = WordPiece::from_file(&vocab_str)
        .unk_token("[UNK]".to_string())
        .build()
        .map_err(|e| {
            PipelineError::Initialization(format!(
                "Failed to read vocabulary '{}': {}",
                vocab_str, e
            ))
        })?;

    let special = |token: &str| {
        wordpiece.get_vocab().get(token).copied().ok_or_else(|| {
            PipelineError::Initialization(format!(
                "Vocabulary '{vocab_str}' has no {token} token"
            ))
        })
    };
    let cls = special("[CLS]")?;
    let sep = special("[SEP]")?;

    let mut tokenizer = Tokenizer::new(wordpiece);
    tokenizer
        .with_normalizer(Some(BertNormalizer::new(true, true, None, true)))
        .with_pre_tokenizer(Some(BertPreTokenizer))
        .with_post_processor(Some(BertProcessing::new(
            ("[SEP]".to_string(), sep),
            ("[CLS]".to_string(), cls),
        )));

    Ok(tokenizer)
}

/// Memory-maps `model.safetensors`, falling back to `pytorch_model.bin`.
pub fn load_weights(repo: &str, device: &Device) -> Result<VarBuilder<'static>> {
    let weights_path = HfLoader::new(repo, "model.safetensors")
        .load()
        .or_else(|e| {
            debug!("No usable model.safetensors in '{repo}' ({e}), falling back to pytorch_model.bin");
            HfLoader::new(repo, "pytorch_model.bin").load()
        })?;

    let vb = if weights_path.extension().is_some_and(|e| e == "safetensors") {
        unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? }
    } else {
        VarBuilder::from_pth(&weights_path, DType::F32, device)?
    };

    Ok(vb)
}
