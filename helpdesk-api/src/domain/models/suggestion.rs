use serde::{Deserialize, Serialize};
use strum::Display;
use time::OffsetDateTime;

use super::{SuggestionId, Ticket, TicketId, UserId};

/// Whether a suggestion's current content has reached the vector index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IndexStatus {
    /// Stored, indexing not yet attempted for the latest content.
    Pending,
    Indexed,
    /// Last embedding or upsert attempt failed; retried by the promotion worker.
    Failed,
}

impl IndexStatus {
    pub fn needs_indexing(self) -> bool {
        matches!(self, IndexStatus::Pending | IndexStatus::Failed)
    }
}

/// A recommended fix, optionally derived from a resolved ticket.
///
/// Only approved suggestions are ever shown to end users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSuggestion {
    pub id: SuggestionId,
    pub tag: String,
    pub summary: String,
    pub steps: String,
    pub created_by: UserId,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub source_ticket_id: Option<TicketId>,
    pub approved: bool,
    pub index_status: IndexStatus,
    /// Bumped by the store on every replace. Index outcomes are recorded against it.
    #[serde(default)]
    pub revision: u64,
}

impl WorkflowSuggestion {
    pub fn new(input: SuggestionInput, created_by: UserId) -> Self {
        Self {
            id: SuggestionId::generate(),
            tag: input.tag,
            summary: input.summary,
            steps: input.steps,
            created_by,
            created_at: OffsetDateTime::now_utc(),
            source_ticket_id: None,
            approved: false,
            index_status: IndexStatus::Pending,
            revision: 0,
        }
    }

    /// Build the unapproved suggestion a resolved ticket is promoted into.
    pub fn from_ticket(ticket: &Ticket) -> Self {
        let input = SuggestionInput {
            tag: ticket.category.clone(),
            summary: format!("{}: {}", ticket.title, ticket.description),
            steps: ticket.resolution.clone(),
        };

        Self {
            source_ticket_id: Some(ticket.id.clone()),
            ..Self::new(input, ticket.user_id.clone())
        }
    }

    /// Text sent to the embedding service.
    pub fn embedding_text(&self) -> String {
        format!("{}\n\n{}", self.summary, self.steps)
    }

    /// Replace the editable content. Identity and provenance are kept.
    pub fn apply(&mut self, input: SuggestionInput) {
        self.tag = input.tag;
        self.summary = input.summary;
        self.steps = input.steps;
    }
}

/// Editable content of a suggestion.
#[derive(Debug, Clone, Default)]
pub struct SuggestionInput {
    pub tag: String,
    pub summary: String,
    pub steps: String,
}

/// A suggestion selected for a query, with both ranking signals.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSuggestion {
    pub suggestion: WorkflowSuggestion,
    /// Similarity reported by the vector index, higher is more similar.
    pub score: f64,
    pub helpful_count: usize,
}

/// Suggestion with its helpful-vote count, as listed by top-rated.
#[derive(Debug, Clone, PartialEq)]
pub struct RatedSuggestion {
    pub suggestion: WorkflowSuggestion,
    pub helpful_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::sample_ticket;

    #[test]
    fn from_ticket_maps_fields() {
        let ticket = sample_ticket("t1", "resolved", "restart the service");
        let suggestion = WorkflowSuggestion::from_ticket(&ticket);

        assert_eq!(suggestion.tag, "ops");
        assert_eq!(suggestion.summary, "Ticket t1: Service keeps crashing");
        assert_eq!(suggestion.steps, "restart the service");
        assert_eq!(suggestion.created_by, UserId::new("alice"));
        assert_eq!(suggestion.source_ticket_id, Some(TicketId::new("t1")));
        assert!(!suggestion.approved);
        assert_eq!(suggestion.index_status, IndexStatus::Pending);
        assert_eq!(suggestion.revision, 0);
    }

    #[test]
    fn embedding_text_joins_summary_and_steps() {
        let ticket = sample_ticket("t1", "resolved", "restart");
        let suggestion = WorkflowSuggestion::from_ticket(&ticket);
        assert_eq!(
            suggestion.embedding_text(),
            "Ticket t1: Service keeps crashing\n\nrestart"
        );
    }

    #[test]
    fn apply_keeps_identity() {
        let mut suggestion = WorkflowSuggestion::new(SuggestionInput::default(), UserId::new("bob"));
        let id = suggestion.id.clone();
        suggestion.apply(SuggestionInput {
            tag: "net".into(),
            summary: "DNS".into(),
            steps: "flush".into(),
        });
        assert_eq!(suggestion.id, id);
        assert_eq!(suggestion.tag, "net");
    }

    #[test]
    fn index_status_display_and_retry() {
        assert_eq!(IndexStatus::Failed.to_string(), "failed");
        assert!(IndexStatus::Pending.needs_indexing());
        assert!(IndexStatus::Failed.needs_indexing());
        assert!(!IndexStatus::Indexed.needs_indexing());
    }
}
