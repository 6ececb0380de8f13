use std::sync::{PoisonError, RwLock};

use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use knowbase_core::chunker::{chunk_document, ChunkingConfig};
use knowbase_core::corpus::Corpus;
use knowbase_core::error::{EmbedError, IndexError};
use knowbase_core::traits::Embedder;
use knowbase_core::types::Chunk;
use knowbase_index::FlatIndex;

const EMBED_BATCH: usize = 32;

/// Observable lifecycle of the service. `Failed` is terminal; a process
/// restart is the only way to re-attempt ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Uninitialized,
    Initializing,
    Ready,
    Failed,
}

/// Why `initialize` did not produce a usable index.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("initialization already started (state: {0:?})")]
    AlreadyStarted(ServiceState),

    #[error("embedding failed during ingestion: {0}")]
    Embed(#[from] EmbedError),

    #[error("index rejected an entry: {0}")]
    Index(#[from] IndexError),
}

enum Phase {
    Uninitialized,
    Initializing,
    Ready(FlatIndex),
    Failed,
}

impl Phase {
    fn state(&self) -> ServiceState {
        match self {
            Phase::Uninitialized => ServiceState::Uninitialized,
            Phase::Initializing => ServiceState::Initializing,
            Phase::Ready(_) => ServiceState::Ready,
            Phase::Failed => ServiceState::Failed,
        }
    }
}

/// Owns the corpus-to-index lifecycle and the public query path.
///
/// Exactly one `initialize` runs at process startup; afterwards the index is
/// read-only and `retrieve` is safe from any number of concurrent callers.
pub struct RetrievalService {
    embedder: Box<dyn Embedder>,
    corpus: Corpus,
    chunking: ChunkingConfig,
    phase: RwLock<Phase>,
}

impl RetrievalService {
    pub fn new(embedder: Box<dyn Embedder>, corpus: Corpus, chunking: ChunkingConfig) -> Self {
        Self { embedder, corpus, chunking, phase: RwLock::new(Phase::Uninitialized) }
    }

    pub fn state(&self) -> ServiceState {
        self.phase.read().unwrap_or_else(PoisonError::into_inner).state()
    }

    pub fn is_ready(&self) -> bool {
        self.state() == ServiceState::Ready
    }

    /// One-shot ingestion: chunk, embed, and index the whole corpus. The
    /// index is built aside and installed only when every step succeeded, so
    /// a failure never leaves a partially filled index behind.
    pub fn initialize(&self) -> Result<(), InitError> {
        {
            let mut phase = self.phase.write().unwrap_or_else(PoisonError::into_inner);
            match *phase {
                Phase::Uninitialized => *phase = Phase::Initializing,
                _ => return Err(InitError::AlreadyStarted(phase.state())),
            }
        }
        match self.build_index() {
            Ok(index) => {
                info!(entries = index.len(), "retrieval index ready");
                *self.phase.write().unwrap_or_else(PoisonError::into_inner) = Phase::Ready(index);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "corpus ingestion failed; retrieval stays disabled for this process");
                *self.phase.write().unwrap_or_else(PoisonError::into_inner) = Phase::Failed;
                Err(e)
            }
        }
    }

    fn build_index(&self) -> Result<FlatIndex, InitError> {
        let mut index = FlatIndex::new(self.embedder.dim());
        let chunks: Vec<Chunk> = self
            .corpus
            .documents()
            .iter()
            .flat_map(|doc| chunk_document(doc, self.chunking))
            .collect();
        if chunks.is_empty() {
            warn!("corpus produced no chunks; retrieval will serve empty results");
            return Ok(index);
        }
        debug!(documents = self.corpus.len(), chunks = chunks.len(), "chunked corpus");

        let pb = ProgressBar::new(chunks.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        for batch in chunks.chunks(EMBED_BATCH) {
            let texts: Vec<String> = batch.iter().map(|c| c.content.clone()).collect();
            let vectors = self.embedder.embed_batch(&texts)?;
            for (chunk, vector) in batch.iter().zip(vectors) {
                index.insert(vector, chunk.clone())?;
                pb.inc(1);
            }
        }
        pb.finish_and_clear();
        Ok(index)
    }

    /// Fetch up to `k` context chunks for `query`, ranked best-first.
    ///
    /// Degrades to an empty result before the index is ready, after a failed
    /// startup, and on any internal error. Never blocks on ingestion and
    /// never propagates an error to the caller.
    pub fn retrieve(&self, query: &str, k: usize) -> Vec<Chunk> {
        let phase = self.phase.read().unwrap_or_else(PoisonError::into_inner);
        let index = match &*phase {
            Phase::Ready(index) => index,
            _ => {
                debug!(state = ?phase.state(), "retrieval not ready; returning no context");
                return Vec::new();
            }
        };
        let vector = match self.embedder.embed(query) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "query embedding failed; returning no context");
                return Vec::new();
            }
        };
        match index.query(&vector, k) {
            Ok(hits) => hits.into_iter().map(|h| h.chunk).collect(),
            Err(e) => {
                warn!(error = %e, "index query failed; returning no context");
                Vec::new()
            }
        }
    }
}
