//! Retrieval service over the knowledge corpus: one-shot ingestion at
//! startup, concurrent read-only queries afterwards.

pub mod service;

pub use knowbase_core::types::DEFAULT_K;
pub use service::{InitError, RetrievalService, ServiceState};
