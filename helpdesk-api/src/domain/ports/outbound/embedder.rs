//! Embedding gateway port (outbound).

use async_trait::async_trait;

use crate::domain::EmbeddingError;

/// Turns text into a fixed-dimension vector.
///
/// Implementations make one network round-trip per call and do not retry;
/// callers decide whether a failure aborts their operation.
#[async_trait]
pub trait Embedder: Send + Sync + 'static {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Reachability probe for health checks.
    async fn health(&self) -> Result<(), EmbeddingError> {
        Ok(())
    }
}
