use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{FeedbackId, SuggestionId, UserId};

/// A helpful / not-helpful vote on a suggestion.
///
/// `workflow_id` is not checked against the suggestion store; votes on deleted
/// suggestions simply stop contributing to rankings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowFeedback {
    pub id: FeedbackId,
    pub workflow_id: SuggestionId,
    pub author_id: UserId,
    pub helpful: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl WorkflowFeedback {
    pub fn new(workflow_id: SuggestionId, author_id: UserId, helpful: bool) -> Self {
        Self {
            id: FeedbackId::generate(),
            workflow_id,
            author_id,
            helpful,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}
