//! Vector index port for workflow suggestions (outbound).

use async_trait::async_trait;

use crate::domain::{models::{SuggestionId, WorkflowSuggestion}, IndexError};

/// A similarity hit, joined back to the suggestion store by id.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexHit {
    pub id: SuggestionId,
    pub score: f64,
}

/// Derived projection of the suggestion store in a vector index.
///
/// The point id always equals the suggestion id.
#[async_trait]
pub trait SuggestionIndex: Send + Sync + 'static {
    /// Insert or replace the point for `suggestion`, waiting until it is durable.
    async fn upsert(&self, suggestion: &WorkflowSuggestion, vector: Vec<f32>)
        -> Result<(), IndexError>;

    /// Hits ordered by the index's similarity score, at most `limit` of them.
    async fn search(
        &self,
        vector: &[f32],
        limit: usize,
        score_threshold: f32,
    ) -> Result<Vec<IndexHit>, IndexError>;

    /// Reachability probe for health checks.
    async fn health(&self) -> Result<(), IndexError>;
}
