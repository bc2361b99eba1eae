use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{
    models::{
        Identity, IndexStatus, SuggestionId, SuggestionInput, Ticket, TicketId, UserId,
        WorkflowSuggestion,
    },
    ports::outbound::{Embedder, SuggestionIndex, SuggestionRepository},
    StoreError, SuggestionError,
};

/// Number of suggestions in each indexing state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStatusCounts {
    pub pending: usize,
    pub indexed: usize,
    pub failed: usize,
}

/// Outcome of one retry pass over unindexed suggestions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryStats {
    pub reindexed: usize,
    pub failed: usize,
}

/// Owns the suggestion lifecycle and keeps the vector index in step with the store.
///
/// Every mutation stores the record as [`IndexStatus::Pending`] first, then embeds
/// `summary + "\n\n" + steps` and upserts the point. The outcome is written back as
/// `Indexed` or `Failed`. An indexing failure never fails the mutation itself.
///
/// Index writes for one suggestion are serialized, and each one re-reads the
/// latest stored revision. An outcome is only recorded if that revision is still
/// current, so a slow attempt on old content leaves the record `Pending` for the
/// attempt that follows the newer save.
pub struct SuggestionService {
    store: Arc<dyn SuggestionRepository>,
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn SuggestionIndex>,
    index_locks: Mutex<HashMap<SuggestionId, Arc<Mutex<()>>>>,
}

enum IndexAttempt {
    /// The latest revision was already indexed.
    Current(WorkflowSuggestion),
    Attempted(WorkflowSuggestion),
    Deleted,
}

impl IndexAttempt {
    fn into_suggestion(self) -> Option<WorkflowSuggestion> {
        match self {
            IndexAttempt::Current(s) | IndexAttempt::Attempted(s) => Some(s),
            IndexAttempt::Deleted => None,
        }
    }
}

impl SuggestionService {
    pub fn new(
        store: Arc<dyn SuggestionRepository>,
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn SuggestionIndex>,
    ) -> Self {
        Self {
            store,
            embedder,
            index,
            index_locks: Mutex::default(),
        }
    }

    pub async fn create(
        &self,
        input: SuggestionInput,
        created_by: UserId,
    ) -> Result<WorkflowSuggestion, SuggestionError> {
        self.insert(WorkflowSuggestion::new(input, created_by)).await
    }

    /// Promote a resolved ticket. The caller is responsible for the one-per-ticket check.
    pub async fn create_from_ticket(
        &self,
        ticket: &Ticket,
    ) -> Result<WorkflowSuggestion, SuggestionError> {
        let suggestion = self.insert(WorkflowSuggestion::from_ticket(ticket)).await?;
        info!(
            suggestion_id = %suggestion.id,
            ticket_id = %ticket.id,
            index_status = %suggestion.index_status,
            "Promoted resolved ticket"
        );
        Ok(suggestion)
    }

    pub async fn get(&self, id: &SuggestionId) -> Result<WorkflowSuggestion, SuggestionError> {
        Ok(self.store.get_by_id(id).await?)
    }

    /// Like [`Self::get`], but unapproved suggestions are only visible to admins.
    /// Anyone else gets `NotFound`, the same as for a missing id.
    pub async fn get_visible(
        &self,
        caller: &Identity,
        id: &SuggestionId,
    ) -> Result<WorkflowSuggestion, SuggestionError> {
        let suggestion = self.store.get_by_id(id).await?;
        if suggestion.approved || caller.is_admin() {
            Ok(suggestion)
        } else {
            Err(StoreError::not_found("suggestion", id).into())
        }
    }

    /// Approved suggestions, optionally restricted to one tag.
    pub async fn list_approved(&self, tag: Option<&str>) -> Vec<WorkflowSuggestion> {
        let suggestions = match tag {
            Some(tag) => self.store.get_by_tag(tag).await,
            None => self.store.list_all().await,
        };
        suggestions.into_iter().filter(|s| s.approved).collect()
    }

    /// Suggestions awaiting admin approval.
    pub async fn list_pending(&self) -> Vec<WorkflowSuggestion> {
        self.store
            .list_all()
            .await
            .into_iter()
            .filter(|s| !s.approved)
            .collect()
    }

    pub async fn find_by_source_ticket(&self, ticket_id: &TicketId) -> Vec<WorkflowSuggestion> {
        self.store.get_by_source_ticket_id(ticket_id).await
    }

    /// Replace the editable content and re-index.
    pub async fn update(
        &self,
        id: &SuggestionId,
        input: SuggestionInput,
    ) -> Result<WorkflowSuggestion, SuggestionError> {
        let mut suggestion = self.store.get_by_id(id).await?;
        suggestion.apply(input);
        self.save(suggestion).await
    }

    /// Make a suggestion visible to end users and re-index so the payload carries the flag.
    pub async fn approve(&self, id: &SuggestionId) -> Result<WorkflowSuggestion, SuggestionError> {
        let mut suggestion = self.store.get_by_id(id).await?;
        suggestion.approved = true;
        self.save(suggestion).await
    }

    /// Remove the record. Its index point is left behind; retrieval drops hits
    /// that no longer resolve to a stored suggestion.
    pub async fn delete(&self, id: &SuggestionId) -> Result<(), SuggestionError> {
        self.store.delete(id).await?;
        self.index_locks.lock().await.remove(id);
        info!(suggestion_id = %id, "Deleted suggestion");
        Ok(())
    }

    /// Retry indexing for every `Pending` or `Failed` suggestion not in `skip`.
    pub async fn retry_unindexed(&self, skip: &HashSet<SuggestionId>) -> RetryStats {
        let mut stats = RetryStats::default();
        let candidates = self
            .store
            .list_by_index_status(&[IndexStatus::Pending, IndexStatus::Failed])
            .await;

        for candidate in candidates {
            if skip.contains(&candidate.id) {
                continue;
            }

            if let IndexAttempt::Attempted(suggestion) = self.index_latest(&candidate.id).await {
                match suggestion.index_status {
                    IndexStatus::Indexed => stats.reindexed += 1,
                    IndexStatus::Failed => stats.failed += 1,
                    // Superseded; the newer save indexes it.
                    IndexStatus::Pending => {}
                }
            }
        }

        stats
    }

    pub async fn index_status_counts(&self) -> IndexStatusCounts {
        self.store
            .list_all()
            .await
            .iter()
            .fold(IndexStatusCounts::default(), |mut counts, s| {
                match s.index_status {
                    IndexStatus::Pending => counts.pending += 1,
                    IndexStatus::Indexed => counts.indexed += 1,
                    IndexStatus::Failed => counts.failed += 1,
                }
                counts
            })
    }

    async fn insert(
        &self,
        mut suggestion: WorkflowSuggestion,
    ) -> Result<WorkflowSuggestion, SuggestionError> {
        suggestion.index_status = IndexStatus::Pending;
        self.store.create(suggestion.clone()).await?;
        Ok(self
            .index_latest(&suggestion.id)
            .await
            .into_suggestion()
            .unwrap_or(suggestion))
    }

    async fn save(
        &self,
        mut suggestion: WorkflowSuggestion,
    ) -> Result<WorkflowSuggestion, SuggestionError> {
        suggestion.index_status = IndexStatus::Pending;
        suggestion.revision = self.store.update(suggestion.clone()).await?;
        Ok(self
            .index_latest(&suggestion.id)
            .await
            .into_suggestion()
            .unwrap_or(suggestion))
    }

    /// Embed and upsert the latest stored revision, then record the outcome against it.
    async fn index_latest(&self, id: &SuggestionId) -> IndexAttempt {
        let lock = self
            .index_locks
            .lock()
            .await
            .entry(id.clone())
            .or_default()
            .clone();
        let _guard = lock.lock().await;

        let mut suggestion = match self.store.get_by_id(id).await {
            Ok(s) => s,
            Err(_) => {
                debug!(suggestion_id = %id, "Suggestion deleted before indexing");
                return IndexAttempt::Deleted;
            }
        };
        if !suggestion.index_status.needs_indexing() {
            return IndexAttempt::Current(suggestion);
        }

        let status = match self.push_to_index(&suggestion).await {
            Ok(()) => IndexStatus::Indexed,
            Err(err) => {
                warn!(
                    suggestion_id = %id,
                    error = %err,
                    "Failed to index suggestion, will retry on next promotion tick"
                );
                IndexStatus::Failed
            }
        };

        match self
            .store
            .set_index_status(id, suggestion.revision, status)
            .await
        {
            Ok(true) => suggestion.index_status = status,
            Ok(false) => {
                debug!(
                    suggestion_id = %id,
                    revision = suggestion.revision,
                    "Suggestion changed while indexing, left pending"
                );
                suggestion.index_status = IndexStatus::Pending;
            }
            Err(err) => {
                debug!(suggestion_id = %id, error = %err, "Could not record index status");
            }
        }

        IndexAttempt::Attempted(suggestion)
    }

    async fn push_to_index(&self, suggestion: &WorkflowSuggestion) -> Result<(), SuggestionError> {
        let vector = self.embedder.embed(&suggestion.embedding_text()).await?;
        self.index.upsert(suggestion, vector).await?;
        Ok(())
    }
}
