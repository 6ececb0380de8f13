use crate::error::{EmbedError, IndexError};
use crate::types::{Chunk, IndexHandle, ScoredChunk};

pub trait Embedder: Send + Sync {
    /// Embedding dimensionality (D).
    fn dim(&self) -> usize;
    /// Maximum input length in tokens, if the model enforces one.
    fn max_len(&self) -> usize;
    /// Embed a single text into a vector of `dim()` floats. Deterministic
    /// for a fixed model: identical input yields an identical vector.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError>;
    /// Batch form, for throughput only: must produce exactly the vectors
    /// `embed` would produce per item.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

pub trait VectorIndex: Send + Sync {
    fn dim(&self) -> usize;
    fn insert(&mut self, vector: Vec<f32>, chunk: Chunk) -> Result<IndexHandle, IndexError>;
    fn query(&self, vector: &[f32], k: usize) -> Result<Vec<ScoredChunk>, IndexError>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
