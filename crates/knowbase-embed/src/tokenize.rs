use candle_core::{Device, Tensor};
use tokenizers::Tokenizer;

use knowbase_core::error::EmbedError;

/// Encode `text`, pad or truncate to `max_len`, and place token ids and the
/// attention mask on `device` as `[1, max_len]` tensors.
pub fn tokenize_on_device(
    tokenizer: &Tokenizer,
    text: &str,
    max_len: usize,
    device: &Device,
) -> Result<(Tensor, Tensor), EmbedError> {
    let enc = tokenizer
        .encode(text, true)
        .map_err(|e| EmbedError::failed(text, format!("tokenization: {e}")))?;
    let mut ids = enc.get_ids().to_vec();
    let mut mask = enc.get_attention_mask().to_vec();
    if ids.len() > max_len {
        ids.truncate(max_len);
        mask.truncate(max_len);
    }
    if ids.len() < max_len {
        let pad = max_len - ids.len();
        ids.extend(std::iter::repeat(1).take(pad));
        mask.extend(std::iter::repeat(0).take(pad));
    }
    let input_ids = Tensor::from_iter(ids, device)
        .and_then(|t| t.reshape((1, max_len)))
        .map_err(|e| EmbedError::failed(text, e.to_string()))?;
    let attention_mask = Tensor::from_iter(mask, device)
        .and_then(|t| t.reshape((1, max_len)))
        .map_err(|e| EmbedError::failed(text, e.to_string()))?;
    Ok((input_ids, attention_mask))
}
