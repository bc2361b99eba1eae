//! Record store ports (outbound).
//!
//! Each store synchronizes its own collection per operation. There are no
//! cross-store transactions.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{
    models::{
        Comment, CommentId, FeedbackId, IndexStatus, SuggestionId, Ticket, TicketId,
        WorkflowFeedback, WorkflowSuggestion,
    },
    StoreError,
};

/// Owner of every [`WorkflowSuggestion`] record.
///
/// The store does not enforce one suggestion per source ticket; the promotion
/// scanner checks [`SuggestionRepository::get_by_source_ticket_id`] first.
#[async_trait]
pub trait SuggestionRepository: Send + Sync + 'static {
    /// Fails with `AlreadyExists` if the id is taken.
    async fn create(&self, suggestion: WorkflowSuggestion) -> Result<(), StoreError>;

    async fn get_by_id(&self, id: &SuggestionId) -> Result<WorkflowSuggestion, StoreError>;

    /// Replace the stored record with the same id and bump its revision.
    ///
    /// Returns the revision now stored.
    async fn update(&self, suggestion: WorkflowSuggestion) -> Result<u64, StoreError>;

    async fn delete(&self, id: &SuggestionId) -> Result<(), StoreError>;

    async fn list_all(&self) -> Vec<WorkflowSuggestion>;

    async fn get_by_tag(&self, tag: &str) -> Vec<WorkflowSuggestion>;

    async fn get_by_source_ticket_id(&self, ticket_id: &TicketId) -> Vec<WorkflowSuggestion>;

    /// Suggestions whose index status is one of `statuses`.
    async fn list_by_index_status(&self, statuses: &[IndexStatus]) -> Vec<WorkflowSuggestion>;

    /// Record the outcome of an indexing attempt made on `revision`.
    ///
    /// Returns `false` and leaves the record untouched if it was replaced after
    /// that revision was read.
    async fn set_index_status(
        &self,
        id: &SuggestionId,
        revision: u64,
        status: IndexStatus,
    ) -> Result<bool, StoreError>;
}

/// Helpfulness votes.
#[async_trait]
pub trait FeedbackRepository: Send + Sync + 'static {
    async fn create(&self, feedback: WorkflowFeedback) -> Result<(), StoreError>;

    async fn get_by_id(&self, id: &FeedbackId) -> Result<WorkflowFeedback, StoreError>;

    async fn delete(&self, id: &FeedbackId) -> Result<(), StoreError>;

    async fn list_all(&self) -> Vec<WorkflowFeedback>;

    async fn get_by_workflow(&self, workflow_id: &SuggestionId) -> Vec<WorkflowFeedback>;

    /// Number of `helpful = true` votes for one suggestion.
    async fn count_helpful(&self, workflow_id: &SuggestionId) -> usize;

    /// Helpful vote counts for every suggestion with at least one helpful vote.
    async fn helpful_counts(&self) -> HashMap<SuggestionId, usize>;
}

#[async_trait]
pub trait TicketRepository: Send + Sync + 'static {
    async fn list_all(&self) -> Vec<Ticket>;

    async fn get_by_id(&self, id: &TicketId) -> Result<Ticket, StoreError>;

    async fn create(&self, ticket: Ticket) -> Result<(), StoreError>;

    async fn update(&self, ticket: Ticket) -> Result<(), StoreError>;

    async fn delete(&self, id: &TicketId) -> Result<(), StoreError>;

    async fn is_empty(&self) -> bool {
        self.list_all().await.is_empty()
    }
}

#[async_trait]
pub trait CommentRepository: Send + Sync + 'static {
    async fn get_by_ticket(&self, ticket_id: &TicketId) -> Vec<Comment>;

    async fn create(&self, comment: Comment) -> Result<(), StoreError>;

    async fn delete(&self, id: &CommentId) -> Result<(), StoreError>;

    /// Remove every comment of a ticket. Returns how many were removed.
    async fn delete_by_ticket(&self, ticket_id: &TicketId) -> usize;
}
