use std::path::PathBuf;

use crate::embedding::error::EmbeddingError;

/// Output width of the all-MiniLM-L6-v2 checkpoint.
pub const MINILM_EMBEDDING_DIM: usize = crate::constants::DEFAULT_EMBEDDING_DIM;

/// Token budget per encoded answer.
pub const MINILM_MAX_SEQ_LEN: usize = crate::constants::DEFAULT_MAX_SEQ_LEN;

/// How to load a [`MiniLmEmbedder`](super::MiniLmEmbedder).
///
/// The real backend needs a sentence-transformers export directory; the
/// stub needs nothing.
#[derive(Debug, Clone)]
pub struct MiniLmConfig {
    /// Directory holding `config.json`, `model.safetensors` and `tokenizer.json`.
    pub model_dir: PathBuf,
    /// Max tokens per encoded answer.
    pub max_seq_len: usize,
    /// Width of the produced vectors.
    pub embedding_dim: usize,
    /// Serve deterministic hash-seeded vectors instead of a model.
    pub testing_stub: bool,
}

impl Default for MiniLmConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::new(),
            max_seq_len: MINILM_MAX_SEQ_LEN,
            embedding_dim: MINILM_EMBEDDING_DIM,
            testing_stub: false,
        }
    }
}

impl MiniLmConfig {
    /// Config pointing at a model export directory.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: model_dir.into(),
            ..Default::default()
        }
    }

    /// Config for the stub backend (no files touched).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    /// Checks the fields a real model load would need.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.testing_stub {
            return Ok(());
        }

        if self.model_dir.as_os_str().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_dir must be set when stub mode is off".to_string(),
            });
        }

        if !self.model_dir.is_dir() {
            return Err(EmbeddingError::ModelNotFound {
                path: self.model_dir.clone(),
            });
        }

        Ok(())
    }

    /// `true` when all three export files are present under `model_dir`.
    pub fn model_available(&self) -> bool {
        !self.model_dir.as_os_str().is_empty()
            && ["config.json", "model.safetensors", "tokenizer.json"]
                .into_iter()
                .all(|file| self.model_dir.join(file).is_file())
    }
}
