use std::path::Path;

use tokenizers::{Tokenizer, TruncationParams};

use crate::embedding::error::EmbeddingError;

/// Loads `tokenizer.json` from the model directory, truncating long inputs.
///
/// The encoder has a hard max sequence length; anything longer is cut to
/// `max_len` tokens rather than rejected.
pub fn load_tokenizer(model_dir: &Path, max_len: usize) -> Result<Tokenizer, EmbeddingError> {
    let path = model_dir.join("tokenizer.json");

    let mut tokenizer =
        Tokenizer::from_file(&path).map_err(|e| EmbeddingError::TokenizationFailed {
            reason: format!("loading {}: {}", path.display(), e),
        })?;

    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length: max_len,
            ..Default::default()
        }))
        .map_err(|e| EmbeddingError::TokenizationFailed {
            reason: format!("configuring truncation: {}", e),
        })?;

    Ok(tokenizer)
}
