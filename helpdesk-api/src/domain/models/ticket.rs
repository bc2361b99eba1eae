use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{CommentId, TicketId, UserId};

/// Status value that, paired with a non-empty resolution, makes a ticket promotable.
pub const RESOLVED_STATUS: &str = "resolved";

/// A support ticket.
///
/// `status` is free-form; only [`RESOLVED_STATUS`] has meaning to the suggestion pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub resolution: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Owner of the ticket.
    pub user_id: UserId,
    /// Engineer the ticket is assigned to, if any.
    pub assigned_to: Option<UserId>,
}

impl Ticket {
    /// Whether the ticket should be promoted into a workflow suggestion.
    pub fn is_promotable(&self) -> bool {
        self.status == RESOLVED_STATUS && !self.resolution.is_empty()
    }

    /// Text used to look up suggestions for this ticket.
    pub fn query_text(&self) -> String {
        format!("{}\n\n{}", self.title, self.description)
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}

/// Fields a caller supplies when creating or replacing a ticket.
#[derive(Debug, Clone, Default)]
pub struct TicketInput {
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub resolution: String,
    pub assigned_to: Option<UserId>,
}

/// A comment on a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub ticket_id: TicketId,
    pub author_id: UserId,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Number of tickets opened by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserActivity {
    pub user_id: UserId,
    pub ticket_count: usize,
}

#[cfg(test)]
pub(crate) fn sample_ticket(id: &str, status: &str, resolution: &str) -> Ticket {
    Ticket {
        id: TicketId::new(id),
        title: format!("Ticket {id}"),
        description: "Service keeps crashing".to_string(),
        category: "ops".to_string(),
        status: status.to_string(),
        resolution: resolution.to_string(),
        created_at: OffsetDateTime::now_utc(),
        user_id: UserId::new("alice"),
        assigned_to: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promotable_requires_resolved_status_and_resolution() {
        assert!(sample_ticket("1", "resolved", "restart the service").is_promotable());
        assert!(!sample_ticket("2", "resolved", "").is_promotable());
        assert!(!sample_ticket("3", "open", "restart the service").is_promotable());
        assert!(!sample_ticket("4", "Resolved", "restart the service").is_promotable());
    }

    #[test]
    fn query_text_joins_title_and_description() {
        let ticket = sample_ticket("1", "open", "");
        assert_eq!(ticket.query_text(), "Ticket 1\n\nService keeps crashing");
    }
}
