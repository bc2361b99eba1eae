use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    models::{FeedbackId, SuggestionId, WorkflowFeedback},
    ports::outbound::FeedbackRepository,
    StoreError,
};

const ENTITY: &str = "feedback";

#[derive(Default)]
pub struct InMemoryFeedbackStore {
    feedback: RwLock<HashMap<FeedbackId, WorkflowFeedback>>,
}

impl InMemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryFeedbackStore {
    async fn create(&self, feedback: WorkflowFeedback) -> Result<(), StoreError> {
        let mut entries = self.feedback.write().await;
        if entries.contains_key(&feedback.id) {
            return Err(StoreError::already_exists(ENTITY, &feedback.id));
        }
        entries.insert(feedback.id.clone(), feedback);
        Ok(())
    }

    async fn get_by_id(&self, id: &FeedbackId) -> Result<WorkflowFeedback, StoreError> {
        self.feedback
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    async fn delete(&self, id: &FeedbackId) -> Result<(), StoreError> {
        self.feedback
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    async fn list_all(&self) -> Vec<WorkflowFeedback> {
        let mut list: Vec<_> = self.feedback.read().await.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        list
    }

    async fn get_by_workflow(&self, workflow_id: &SuggestionId) -> Vec<WorkflowFeedback> {
        let mut list: Vec<_> = self
            .feedback
            .read()
            .await
            .values()
            .filter(|fb| &fb.workflow_id == workflow_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        list
    }

    async fn count_helpful(&self, workflow_id: &SuggestionId) -> usize {
        self.feedback
            .read()
            .await
            .values()
            .filter(|fb| fb.helpful && &fb.workflow_id == workflow_id)
            .count()
    }

    async fn helpful_counts(&self) -> HashMap<SuggestionId, usize> {
        let entries = self.feedback.read().await;
        let mut counts = HashMap::new();
        for fb in entries.values().filter(|fb| fb.helpful) {
            *counts.entry(fb.workflow_id.clone()).or_insert(0) += 1;
        }
        counts
    }
}
