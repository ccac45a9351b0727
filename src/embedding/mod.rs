//! Sentence embedding for answer comparison.
//!
//! [`minilm`] wraps a BERT-family sentence encoder loaded through candle,
//! with a deterministic stub backend for tests and model-less deployments.

/// BERT sentence encoder wrapper used by the MiniLM embedder.
pub mod bert;
/// Compute device probing (Metal / CUDA when compiled in, CPU otherwise).
pub mod device;
mod error;
/// MiniLM embedder (answer-level sentence vectors).
pub mod minilm;
/// Tokenizer loading helpers.
pub mod utils;

pub use error::EmbeddingError;
pub use minilm::{MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN, MiniLmConfig, MiniLmEmbedder};
