//! Similarity retrieval joined with the suggestion and feedback stores.

use std::{cmp::Ordering, sync::Arc};

use tracing::debug;

use crate::domain::{
    models::RankedSuggestion,
    ports::outbound::{Embedder, FeedbackRepository, SuggestionIndex, SuggestionRepository},
    SuggestionError,
};

/// Hits requested from the index per result slot, to leave room for filtering.
pub const OVERFETCH_FACTOR: usize = 3;

/// Accept every hit the index returns.
pub const SCORE_THRESHOLD: f32 = 0.0;

pub struct RetrievalEngine {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn SuggestionIndex>,
    suggestions: Arc<dyn SuggestionRepository>,
    feedback: Arc<dyn FeedbackRepository>,
}

impl RetrievalEngine {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn SuggestionIndex>,
        suggestions: Arc<dyn SuggestionRepository>,
        feedback: Arc<dyn FeedbackRepository>,
    ) -> Self {
        Self {
            embedder,
            index,
            suggestions,
            feedback,
        }
    }

    /// Approved suggestions most relevant to `query`, at most `limit` of them.
    ///
    /// A blank query or a zero limit returns an empty list without calling out.
    /// Gateway failures are returned as errors, never as an empty list.
    pub async fn suggest_for(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RankedSuggestion>, SuggestionError> {
        if limit == 0 || query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let vector = self.embedder.embed(query).await?;
        self.suggest_for_vector(&vector, limit).await
    }

    /// Same as [`Self::suggest_for`] for a query that is already embedded.
    pub async fn suggest_for_vector(
        &self,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<RankedSuggestion>, SuggestionError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let hits = self
            .index
            .search(vector, limit.saturating_mul(OVERFETCH_FACTOR), SCORE_THRESHOLD)
            .await?;

        let mut candidates = Vec::with_capacity(hits.len());
        for hit in hits {
            let suggestion = match self.suggestions.get_by_id(&hit.id).await {
                Ok(s) if s.approved => s,
                Ok(_) => {
                    debug!(suggestion_id = %hit.id, "Dropping unapproved hit");
                    continue;
                }
                Err(_) => {
                    debug!(suggestion_id = %hit.id, "Dropping hit without a stored suggestion");
                    continue;
                }
            };

            let helpful_count = self.feedback.count_helpful(&suggestion.id).await;
            candidates.push(RankedSuggestion {
                suggestion,
                score: hit.score,
                helpful_count,
            });
        }

        Ok(rank(candidates, limit))
    }
}

/// Order by similarity score descending, then helpful votes descending, and keep `limit`.
///
/// The sort is stable, so fully tied candidates keep the index's order.
pub fn rank(mut candidates: Vec<RankedSuggestion>, limit: usize) -> Vec<RankedSuggestion> {
    candidates.sort_by(compare);
    candidates.truncate(limit);
    candidates
}

fn compare(a: &RankedSuggestion, b: &RankedSuggestion) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.helpful_count.cmp(&a.helpful_count))
}
