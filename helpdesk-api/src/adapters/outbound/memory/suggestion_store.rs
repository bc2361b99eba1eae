use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    models::{IndexStatus, SuggestionId, TicketId, WorkflowSuggestion},
    ports::outbound::SuggestionRepository,
    StoreError,
};

const ENTITY: &str = "suggestion";

/// In-memory suggestion store behind a single reader/writer lock.
///
/// Listings are ordered by creation time so responses are stable.
#[derive(Default)]
pub struct InMemorySuggestionStore {
    suggestions: RwLock<HashMap<SuggestionId, WorkflowSuggestion>>,
}

impl InMemorySuggestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn collect<F>(&self, predicate: F) -> Vec<WorkflowSuggestion>
    where
        F: Fn(&WorkflowSuggestion) -> bool,
    {
        let suggestions = self.suggestions.read().await;
        let mut list: Vec<_> = suggestions
            .values()
            .filter(|s| predicate(s))
            .cloned()
            .collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        list
    }
}

#[async_trait]
impl SuggestionRepository for InMemorySuggestionStore {
    async fn create(&self, suggestion: WorkflowSuggestion) -> Result<(), StoreError> {
        let mut suggestions = self.suggestions.write().await;
        if suggestions.contains_key(&suggestion.id) {
            return Err(StoreError::already_exists(ENTITY, &suggestion.id));
        }
        suggestions.insert(suggestion.id.clone(), suggestion);
        Ok(())
    }

    async fn get_by_id(&self, id: &SuggestionId) -> Result<WorkflowSuggestion, StoreError> {
        self.suggestions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    async fn update(&self, mut suggestion: WorkflowSuggestion) -> Result<u64, StoreError> {
        let mut suggestions = self.suggestions.write().await;
        match suggestions.get_mut(&suggestion.id) {
            Some(existing) => {
                suggestion.revision = existing.revision + 1;
                *existing = suggestion;
                Ok(existing.revision)
            }
            None => Err(StoreError::not_found(ENTITY, &suggestion.id)),
        }
    }

    async fn delete(&self, id: &SuggestionId) -> Result<(), StoreError> {
        self.suggestions
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    async fn list_all(&self) -> Vec<WorkflowSuggestion> {
        self.collect(|_| true).await
    }

    async fn get_by_tag(&self, tag: &str) -> Vec<WorkflowSuggestion> {
        self.collect(|s| s.tag == tag).await
    }

    async fn get_by_source_ticket_id(&self, ticket_id: &TicketId) -> Vec<WorkflowSuggestion> {
        self.collect(|s| s.source_ticket_id.as_ref() == Some(ticket_id))
            .await
    }

    async fn list_by_index_status(&self, statuses: &[IndexStatus]) -> Vec<WorkflowSuggestion> {
        self.collect(|s| statuses.contains(&s.index_status)).await
    }

    async fn set_index_status(
        &self,
        id: &SuggestionId,
        revision: u64,
        status: IndexStatus,
    ) -> Result<bool, StoreError> {
        let mut suggestions = self.suggestions.write().await;
        let suggestion = suggestions
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(ENTITY, id))?;
        if suggestion.revision != revision {
            return Ok(false);
        }
        suggestion.index_status = status;
        Ok(true)
    }
}
