//! Embedder implementations behind the `knowbase_core::traits::Embedder`
//! seam: a candle-backed local transformer model and a deterministic hashing
//! embedder for tests and offline use.

use std::path::{Path, PathBuf};

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::xlm_roberta::{Config as XlmRobertaConfig, XLMRobertaModel};
use tokenizers::Tokenizer;
use tracing::info;

use knowbase_core::error::EmbedError;
use knowbase_core::traits::Embedder;

pub mod device;
pub mod hash;
pub mod pool;
pub mod tokenize;

pub use hash::{HashEmbedder, DEFAULT_HASH_DIM};

const MODEL_MAX_LEN: usize = 256;

/// Transformer embedder backed by a local XLM-RoBERTa-family checkpoint
/// (`tokenizer.json`, `config.json`, `pytorch_model.bin` in one directory).
/// Output vectors are masked-mean pooled and L2-normalized; dimensionality
/// comes from the model config.
pub struct ModelEmbedder {
    model: XLMRobertaModel,
    tokenizer: Tokenizer,
    device: Device,
    dim: usize,
    max_len: usize,
}

impl ModelEmbedder {
    pub fn load(model_dir: &Path) -> Result<Self, EmbedError> {
        let device = device::select_device();

        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            EmbedError::ModelUnavailable(format!("tokenizer {}: {}", tokenizer_path.display(), e))
        })?;

        let config_path = model_dir.join("config.json");
        let config_text = std::fs::read_to_string(&config_path).map_err(|e| {
            EmbedError::ModelUnavailable(format!("config {}: {}", config_path.display(), e))
        })?;
        let config: XlmRobertaConfig = serde_json::from_str(&config_text)
            .map_err(|e| EmbedError::ModelUnavailable(format!("config parse: {e}")))?;

        let weights_path = model_dir.join("pytorch_model.bin");
        let weights = candle_core::pickle::read_all(&weights_path).map_err(|e| {
            EmbedError::ModelUnavailable(format!("weights {}: {}", weights_path.display(), e))
        })?;
        let weights_map: std::collections::HashMap<String, Tensor> = weights.into_iter().collect();
        let vb = VarBuilder::from_tensors(weights_map, DType::F32, &device);

        let dim = config.hidden_size;
        let model = XLMRobertaModel::new(&config, vb)
            .map_err(|e| EmbedError::ModelUnavailable(format!("model init: {e}")))?;
        info!(dim, "loaded embedding model from {}", model_dir.display());
        Ok(Self { model, tokenizer, device, dim, max_len: MODEL_MAX_LEN })
    }
}

impl Embedder for ModelEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn max_len(&self) -> usize {
        self.max_len
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let as_embed_err = |e: candle_core::Error| EmbedError::failed(text, e.to_string());

        let (input_ids, attention_mask) =
            tokenize::tokenize_on_device(&self.tokenizer, text, self.max_len, &self.device)?;
        let token_type_ids =
            Tensor::zeros((1, self.max_len), DType::I64, &self.device).map_err(as_embed_err)?;
        let hidden = self
            .model
            .forward(&input_ids, &attention_mask, &token_type_ids, None, None, None)
            .map_err(as_embed_err)?;
        let pooled = pool::masked_mean_l2(&hidden, &attention_mask).map_err(as_embed_err)?;
        let vector: Vec<f32> = pooled
            .to_device(&Device::Cpu)
            .and_then(|t| t.squeeze(0))
            .and_then(|t| t.to_vec1())
            .map_err(as_embed_err)?;
        if vector.len() != self.dim {
            return Err(EmbedError::failed(
                text,
                format!("pooled dim {} != model dim {}", vector.len(), self.dim),
            ));
        }
        Ok(vector)
    }
}

/// Pick the embedder for this process: the hashing embedder when
/// `APP_USE_HASH_EMBEDDINGS=1`, otherwise the local model.
pub fn default_embedder() -> Result<Box<dyn Embedder>, EmbedError> {
    let use_hash = std::env::var("APP_USE_HASH_EMBEDDINGS")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if use_hash {
        info!("using HashEmbedder");
        return Ok(Box::new(HashEmbedder::default()));
    }
    let model_dir = resolve_model_dir()?;
    Ok(Box::new(ModelEmbedder::load(&model_dir)?))
}

fn resolve_model_dir() -> Result<PathBuf, EmbedError> {
    for var in ["APP_MODEL_DIR", "MODEL_DIR"] {
        if let Ok(dir) = std::env::var(var) {
            let p = PathBuf::from(&dir);
            if p.exists() {
                info!("using {}: {}", var, p.display());
                return Ok(p);
            }
        }
    }
    let default = Path::new("models/embedding");
    if default.exists() {
        return Ok(default.to_path_buf());
    }
    Err(EmbedError::ModelUnavailable(
        "no embedding model directory found; set APP_MODEL_DIR or APP_USE_HASH_EMBEDDINGS=1".to_string(),
    ))
}
