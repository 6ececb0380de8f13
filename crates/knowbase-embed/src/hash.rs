use std::hash::Hasher;
use twox_hash::XxHash64;

use knowbase_core::error::EmbedError;
use knowbase_core::traits::Embedder;

pub const DEFAULT_HASH_DIM: usize = 1024;

/// Deterministic bag-of-words embedder that hashes normalized tokens into a
/// fixed number of buckets. Identical text always yields an identical
/// vector; texts sharing vocabulary land close under cosine similarity.
/// Used for tests, development, and offline operation.
pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_DIM)
    }
}

impl Embedder for HashEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn max_len(&self) -> usize {
        usize::MAX
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let mut v = vec![0f32; self.dim];
        for (i, raw) in text.split_whitespace().enumerate() {
            let token = normalize_token(raw);
            if token.is_empty() {
                continue;
            }
            let mut hasher = XxHash64::with_seed(0);
            hasher.write(token.as_bytes());
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += val + (i % 3) as f32 * 0.01;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt().max(1e-6);
        for x in &mut v {
            *x /= norm;
        }
        Ok(v)
    }
}

/// Lowercase and strip non-alphanumeric edges so punctuation variants of a
/// word ("water.", "water?") hash to the same bucket.
fn normalize_token(raw: &str) -> String {
    raw.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase()
}
