use candle_core::{DType, Device, Result, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;

/// Mean-pooled BERT sentence encoder.
///
/// Loads a sentence-transformers safetensors export and reduces the final
/// hidden states to one vector per input by attention-masked mean pooling.
pub struct SentenceBert {
    bert: BertModel,
    hidden_size: usize,
}

impl SentenceBert {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let dir = model_dir.as_ref();

        let raw_config = std::fs::read_to_string(dir.join("config.json"))?;
        let config: Config = serde_json::from_str(&raw_config)
            .map_err(|e| candle_core::Error::Msg(format!("parsing config.json: {}", e)))?;

        let weights = dir.join("model.safetensors");
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights], DType::F32, device)? };

        // Sentence-transformers exports sometimes nest the weights under a
        // `bert.` prefix and sometimes do not.
        let bert = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), &config)?
        } else {
            BertModel::load(vb, &config)?
        };

        Ok(Self {
            bert,
            hidden_size: config.hidden_size,
        })
    }

    /// Width of the pooled embedding (the checkpoint's hidden size).
    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Encodes a `[1, seq_len]` token batch into a `[1, hidden_size]` vector.
    ///
    /// Padding positions are masked out of the mean, so short inputs are not
    /// dragged toward zero.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        let hidden = self
            .bert
            .forward(input_ids, token_type_ids, Some(attention_mask))?;

        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?;
        summed.broadcast_div(&counts)
    }
}
