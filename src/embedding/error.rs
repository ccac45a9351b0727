use std::path::PathBuf;
use thiserror::Error;

/// Failures from loading or running the sentence encoder.
///
/// Loading problems ([`ModelNotFound`](Self::ModelNotFound),
/// [`ModelLoadFailed`](Self::ModelLoadFailed),
/// [`InvalidConfig`](Self::InvalidConfig)) surface at startup; the rest can
/// occur per request.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("sentence encoder not found: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("sentence encoder failed to load: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("sentence encoding failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("tokenizer error: {reason}")]
    TokenizationFailed { reason: String },

    #[error("bad embedder configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<std::io::Error> for EmbeddingError {
    fn from(err: std::io::Error) -> Self {
        EmbeddingError::ModelLoadFailed {
            reason: err.to_string(),
        }
    }
}

impl From<candle_core::Error> for EmbeddingError {
    fn from(err: candle_core::Error) -> Self {
        EmbeddingError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}
