//! In-memory vector index with an exact cosine scan.
//!
//! A flat scan is the right structure at this corpus scale (well under a few
//! thousand entries); the `VectorIndex` trait keeps the contract open to
//! graph- or tree-based structures behind the same insert/query surface.
//! The similarity measure is cosine and is fixed for the index's lifetime.

use knowbase_core::error::IndexError;
use knowbase_core::traits::VectorIndex;
use knowbase_core::types::{Chunk, IndexHandle, ScoredChunk};

/// One stored entry: the vector, its chunk, and the insertion sequence
/// number used to break score ties deterministically.
struct Entry {
    vector: Vec<f32>,
    chunk: Chunk,
    seq: u64,
}

pub struct FlatIndex {
    dim: usize,
    entries: Vec<Entry>,
}

impl FlatIndex {
    pub fn new(dim: usize) -> Self {
        Self { dim, entries: Vec::new() }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Store `(vector, chunk)` and assign the next sequence number. Vectors
    /// of any other dimension than the index's are rejected.
    pub fn insert(&mut self, vector: Vec<f32>, chunk: Chunk) -> Result<IndexHandle, IndexError> {
        if vector.len() != self.dim {
            return Err(IndexError::DimensionMismatch { expected: self.dim, actual: vector.len() });
        }
        let seq = self.entries.len() as u64;
        self.entries.push(Entry { vector, chunk, seq });
        Ok(IndexHandle(seq))
    }

    /// Up to `k` entries ranked by descending cosine similarity; equal
    /// scores resolve to the earliest insertion. Repeated identical queries
    /// return identical results. An empty index returns an empty result.
    pub fn query(&self, vector: &[f32], k: usize) -> Result<Vec<ScoredChunk>, IndexError> {
        if vector.len() != self.dim {
            return Err(IndexError::DimensionMismatch { expected: self.dim, actual: vector.len() });
        }
        if k == 0 {
            return Err(IndexError::InvalidK);
        }
        let mut scored: Vec<(f32, &Entry)> = self
            .entries
            .iter()
            .map(|e| (cosine_similarity(vector, &e.vector), e))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.seq.cmp(&b.1.seq)));
        Ok(scored
            .into_iter()
            .take(k)
            .map(|(score, e)| ScoredChunk { chunk: e.chunk.clone(), score })
            .collect())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl VectorIndex for FlatIndex {
    fn dim(&self) -> usize {
        FlatIndex::dim(self)
    }

    fn insert(&mut self, vector: Vec<f32>, chunk: Chunk) -> Result<IndexHandle, IndexError> {
        FlatIndex::insert(self, vector, chunk)
    }

    fn query(&self, vector: &[f32], k: usize) -> Result<Vec<ScoredChunk>, IndexError> {
        FlatIndex::query(self, vector, k)
    }

    fn len(&self) -> usize {
        FlatIndex::len(self)
    }
}

/// Cosine similarity of two equal-length vectors. Zero vectors score 0.0
/// rather than NaN, so ranking stays total.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denominator = (norm_a * norm_b).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }
    dot / denominator
}
