use thiserror::Error;

/// Chunker input violations.
#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("invalid chunking config: overlap {overlap} must be smaller than max {max}")]
    InvalidOverlap { max: usize, overlap: usize },
}

/// Embedding failures. `input` identifies the offending text, truncated to a
/// short preview so errors stay loggable.
#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("embedding model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("embedding failed for \"{input}\": {reason}")]
    Failed { input: String, reason: String },
}

impl EmbedError {
    const PREVIEW_CHARS: usize = 48;

    pub fn failed(input: &str, reason: impl Into<String>) -> Self {
        let mut preview: String = input.chars().take(Self::PREVIEW_CHARS).collect();
        if preview.len() < input.len() {
            preview.push_str("...");
        }
        Self::Failed { input: preview, reason: reason.into() }
    }
}

/// Vector index contract violations.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid result count: k must be positive")]
    InvalidK,
}
