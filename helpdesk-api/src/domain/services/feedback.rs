use std::sync::Arc;

use itertools::Itertools;

use crate::domain::{
    models::{FeedbackId, RatedSuggestion, SuggestionId, UserId, WorkflowFeedback},
    ports::outbound::{FeedbackRepository, SuggestionRepository},
    StoreError,
};

pub struct FeedbackService {
    feedback: Arc<dyn FeedbackRepository>,
    suggestions: Arc<dyn SuggestionRepository>,
}

impl FeedbackService {
    pub fn new(
        feedback: Arc<dyn FeedbackRepository>,
        suggestions: Arc<dyn SuggestionRepository>,
    ) -> Self {
        Self {
            feedback,
            suggestions,
        }
    }

    /// Record a vote. The workflow id is not checked against the suggestion store.
    pub async fn submit(
        &self,
        workflow_id: SuggestionId,
        author_id: UserId,
        helpful: bool,
    ) -> Result<WorkflowFeedback, StoreError> {
        let feedback = WorkflowFeedback::new(workflow_id, author_id, helpful);
        self.feedback.create(feedback.clone()).await?;
        Ok(feedback)
    }

    pub async fn list(&self, workflow_id: &SuggestionId) -> Vec<WorkflowFeedback> {
        self.feedback.get_by_workflow(workflow_id).await
    }

    /// Delete a vote addressed through its workflow. A vote belonging to another
    /// workflow is reported as not found.
    pub async fn delete(
        &self,
        workflow_id: &SuggestionId,
        feedback_id: &FeedbackId,
    ) -> Result<(), StoreError> {
        let feedback = self.feedback.get_by_id(feedback_id).await?;
        if &feedback.workflow_id != workflow_id {
            return Err(StoreError::not_found("feedback", feedback_id));
        }
        self.feedback.delete(feedback_id).await
    }

    /// Approved suggestions by helpful votes descending, newest first on ties.
    pub async fn top_rated(&self, limit: usize) -> Vec<RatedSuggestion> {
        let counts = self.feedback.helpful_counts().await;

        self.suggestions
            .list_all()
            .await
            .into_iter()
            .filter(|s| s.approved)
            .map(|suggestion| RatedSuggestion {
                helpful_count: counts.get(&suggestion.id).copied().unwrap_or(0),
                suggestion,
            })
            .sorted_by(|a, b| {
                b.helpful_count
                    .cmp(&a.helpful_count)
                    .then_with(|| b.suggestion.created_at.cmp(&a.suggestion.created_at))
            })
            .take(limit)
            .collect()
    }
}
