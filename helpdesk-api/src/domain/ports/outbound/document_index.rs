//! Vector index port for uploaded document chunks (outbound).

use async_trait::async_trait;

use crate::domain::{
    models::{ContextItem, DocumentChunk},
    IndexError,
};

#[async_trait]
pub trait DocumentIndex: Send + Sync + 'static {
    /// Store embedded chunks. Returns how many points were written.
    async fn upsert_chunks(&self, chunks: Vec<(DocumentChunk, Vec<f32>)>)
        -> Result<usize, IndexError>;

    /// Chunks most similar to `vector`.
    async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<ContextItem>, IndexError>;
}
