//! all-MiniLM-L6-v2 sentence encoder.
//!
//! Wraps a candle BERT with attention-masked mean pooling and L2
//! normalization. [`MiniLmConfig::stub`] swaps in deterministic hash-seeded
//! vectors for tests that need no model files.

pub mod config;


pub use config::{MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN, MiniLmConfig};

use candle_core::{Device, Tensor};
use tracing::{debug, info, warn};

use crate::embedding::bert::SentenceBert;
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::load_tokenizer;

enum Backend {
    Model(BertPipeline),
    Stub,
}

/// Sentence embedder behind the grading pipeline.
///
/// Loaded once at startup and shared; all methods take `&self`.
pub struct MiniLmEmbedder {
    backend: Backend,
    config: MiniLmConfig,
}

impl std::fmt::Debug for MiniLmEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let backend = match &self.backend {
            Backend::Model(pipeline) => format!("Bert({:?})", pipeline.device),
            Backend::Stub => "Stub".to_string(),
        };

        f.debug_struct("MiniLmEmbedder")
            .field("backend", &backend)
            .field("embedding_dim", &self.config.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl MiniLmEmbedder {
    /// Loads the embedder described by `config` (stub mode included).
    pub fn load(config: MiniLmConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("MiniLM embedder in stub mode; similarity scores are not meaningful");
            return Ok(Self {
                backend: Backend::Stub,
                config,
            });
        }

        if !config.model_available() {
            return Err(EmbeddingError::ModelNotFound {
                path: config.model_dir.clone(),
            });
        }

        let pipeline = BertPipeline::load(&config)?;

        info!(
            model_dir = %config.model_dir.display(),
            hidden_size = pipeline.model.hidden_size(),
            max_seq_len = config.max_seq_len,
            "MiniLM sentence encoder ready"
        );

        Ok(Self {
            backend: Backend::Model(pipeline),
            config,
        })
    }

    /// Embeds one string into a unit-length vector.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            Backend::Model(pipeline) => pipeline.encode(text, self.config.embedding_dim),
            Backend::Stub => Ok(stub_vector(text, self.config.embedding_dim)),
        }
    }

    /// Embeds a batch of strings, preserving input order.
    pub fn embed_batch<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        // Sequential forward passes; proper batching would need padding.
        texts.iter().map(|text| self.embed(text.as_ref())).collect()
    }

    /// Width of the vectors [`embed`](Self::embed) returns.
    pub fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }

    /// `true` when serving hash-seeded stub vectors.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, Backend::Stub)
    }

    /// `true` when a real model is behind [`embed`](Self::embed).
    pub fn has_model(&self) -> bool {
        matches!(self.backend, Backend::Model(_))
    }

    /// The configuration this embedder was loaded with.
    pub fn config(&self) -> &MiniLmConfig {
        &self.config
    }
}

struct BertPipeline {
    model: SentenceBert,
    tokenizer: tokenizers::Tokenizer,
    device: Device,
}

impl BertPipeline {
    fn load(config: &MiniLmConfig) -> Result<Self, EmbeddingError> {
        let device = select_device();
        debug!(?device, "MiniLM compute device selected");

        let tokenizer = load_tokenizer(&config.model_dir, config.max_seq_len)?;

        let model = SentenceBert::load(&config.model_dir, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("loading BERT weights: {}", e),
            }
        })?;

        if model.hidden_size() != config.embedding_dim {
            return Err(EmbeddingError::InvalidConfig {
                reason: format!(
                    "embedding_dim ({}) does not match model hidden_size ({})",
                    config.embedding_dim,
                    model.hidden_size()
                ),
            });
        }

        Ok(Self {
            model,
            tokenizer,
            device,
        })
    }

    fn encode(&self, text: &str, dim: usize) -> Result<Vec<f32>, EmbeddingError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| EmbeddingError::TokenizationFailed {
                reason: e.to_string(),
            })?;

        let token_ids = encoding.get_ids();
        if token_ids.is_empty() {
            return Ok(vec![0.0; dim]);
        }

        debug!(text_len = text.len(), tokens = token_ids.len(), "BERT forward pass");

        let input_ids = Tensor::new(token_ids, &self.device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(encoding.get_type_ids(), &self.device)?.unsqueeze(0)?;
        let mask = Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let pooled = self
            .model
            .forward(&input_ids, &type_ids, &mask)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("BERT forward pass: {}", e),
            })?;

        Ok(normalize(pooled.squeeze(0)?.to_vec1::<f32>()?))
    }
}

/// Deterministic unit vector seeded from the text's hash.
///
/// Identical texts embed identically, distinct texts land near orthogonal
/// in high dimensions; that is all the contract tests need.
fn stub_vector(text: &str, dim: usize) -> Vec<f32> {
    use std::hash::{DefaultHasher, Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    let mut state = hasher.finish();

    let raw: Vec<f32> = (0..dim)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0
        })
        .collect();

    normalize(raw)
}

fn normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }

    embedding
}
