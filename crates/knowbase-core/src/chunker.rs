//! Overlapping text chunker.
//!
//! Splits a document into segments bounded by `max_chars`, preferring to cut
//! at a paragraph, sentence, or word boundary before falling back to a hard
//! cut. Consecutive chunks share `overlap_chars` of trailing context so that
//! meaning spanning a chunk edge stays retrievable.

use crate::error::ChunkError;
use crate::types::{Chunk, Document};

/// Chunking knobs. Construction validates `overlap < max`, so a held config
/// is always usable.
#[derive(Debug, Clone, Copy)]
pub struct ChunkingConfig {
    max_chars: usize,
    overlap_chars: usize,
}

impl ChunkingConfig {
    pub fn new(max_chars: usize, overlap_chars: usize) -> Result<Self, ChunkError> {
        if max_chars == 0 || overlap_chars >= max_chars {
            return Err(ChunkError::InvalidOverlap { max: max_chars, overlap: overlap_chars });
        }
        Ok(Self { max_chars, overlap_chars })
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn overlap_chars(&self) -> usize {
        self.overlap_chars
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { max_chars: 2048, overlap_chars: 200 }
    }
}

/// A chunk boundary within a document, as byte offsets into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Split `text` into overlapping spans covering `[0, text.len())` with no
/// gaps. A text shorter than `max_chars` yields exactly one span; empty
/// input yields none. Pure function of its inputs.
pub fn split(text: &str, config: ChunkingConfig) -> Vec<Span> {
    if text.is_empty() {
        return Vec::new();
    }
    if text.len() <= config.max_chars {
        return vec![Span { start: 0, end: text.len() }];
    }

    let mut spans = Vec::new();
    let mut start = 0usize;
    while start < text.len() {
        let mut window_end = floor_char_boundary(text, (start + config.max_chars).min(text.len()));
        if window_end <= start {
            // A multi-byte char straddles the window edge; take it whole
            // rather than emit an empty span.
            window_end = ceil_char_boundary(text, start + 1);
        }
        let end = if window_end < text.len() {
            break_point(&text[start..window_end])
                .map(|off| start + off)
                .unwrap_or(window_end)
        } else {
            window_end
        };
        spans.push(Span { start, end });
        if end >= text.len() {
            break;
        }
        let next = floor_char_boundary(text, end.saturating_sub(config.overlap_chars));
        // Overlap must never stall the walk on a short chunk.
        start = if next > start { next } else { end };
    }
    spans
}

/// Chunk a whole document, attaching positional metadata to each piece.
pub fn chunk_document(doc: &Document, config: ChunkingConfig) -> Vec<Chunk> {
    let spans = split(&doc.body, config);
    let total_chunks = spans.len();
    spans
        .into_iter()
        .enumerate()
        .map(|(chunk_index, span)| Chunk {
            doc_id: doc.id.clone(),
            content: doc.body[span.start..span.end].to_string(),
            start_offset: span.start,
            end_offset: span.end,
            chunk_index,
            total_chunks,
        })
        .collect()
}

/// Find the best cut inside `window` (a slice starting at the chunk start):
/// paragraph break, then sentence end, then line break, then word boundary.
/// Boundaries in the first third are ignored so chunks do not collapse.
/// Returns the cut offset relative to the window start, or `None` when the
/// caller should hard-cut at the window edge.
fn break_point(window: &str) -> Option<usize> {
    let min = window.len() / 3;
    if let Some(pos) = window.rfind("\n\n") {
        if pos > min {
            return Some(pos + 2);
        }
    }
    for pat in [". ", "! ", "? ", ".\n", "!\n", "?\n"] {
        if let Some(pos) = window.rfind(pat) {
            if pos > min {
                return Some(pos + pat.len());
            }
        }
    }
    if let Some(pos) = window.rfind('\n') {
        if pos > min {
            return Some(pos + 1);
        }
    }
    window.rfind(' ').map(|pos| pos + 1)
}

fn floor_char_boundary(text: &str, mut i: usize) -> usize {
    if i >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_char_boundary(text: &str, mut i: usize) -> usize {
    if i >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(i) {
        i += 1;
    }
    i
}
