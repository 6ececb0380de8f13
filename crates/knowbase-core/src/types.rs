//! Domain types shared by the chunker, index, and retrieval service.

use serde::{Deserialize, Serialize};

pub type DocId = String;

/// Result count used when a caller does not specify one.
pub const DEFAULT_K: usize = 4;

/// A source document from the knowledge corpus, supplied once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub body: String,
}

impl Document {
    pub fn new(id: impl Into<DocId>, body: impl Into<String>) -> Self {
        Self { id: id.into(), body: body.into() }
    }
}

/// A chunk of a source document, the atomic unit stored and retrieved.
///
/// - `doc_id`: identity of the parent document
/// - `content`: the exact text slice `[start_offset, end_offset)` of the body
/// - `start_offset`/`end_offset`: byte offsets into the parent body
/// - `chunk_index`/`total_chunks`: position within the parent document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub doc_id: DocId,
    pub content: String,
    pub start_offset: usize,
    pub end_offset: usize,
    pub chunk_index: usize,
    pub total_chunks: usize,
}

/// Handle returned by the index for an inserted entry. Doubles as the
/// insertion sequence number used for deterministic tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IndexHandle(pub u64);

/// One ranked result. `score` is cosine similarity; higher is always better.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}
