//! HTTP response types.
//!
//! Field names are snake_case, matching the existing frontend.

use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::{
    models::{
        Comment, ContextItem, IndexStatus, RankedSuggestion, RatedSuggestion, Ticket,
        UserActivity, WorkflowFeedback, WorkflowSuggestion,
    },
    services::{ChatAnswer, IndexStatusCounts},
};

#[derive(Debug, Serialize)]
pub struct TicketResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub resolution: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub user_id: String,
    pub assigned_to: Option<String>,
}

impl From<Ticket> for TicketResponse {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id.to_string(),
            title: ticket.title,
            description: ticket.description,
            category: ticket.category,
            status: ticket.status,
            resolution: ticket.resolution,
            created_at: ticket.created_at,
            user_id: ticket.user_id.to_string(),
            assigned_to: ticket.assigned_to.map(|id| id.to_string()),
        }
    }
}

/// A ticket with its comments, oldest first.
#[derive(Debug, Serialize)]
pub struct TicketDetailResponse {
    #[serde(flatten)]
    pub ticket: TicketResponse,
    pub comments: Vec<CommentResponse>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub ticket_id: String,
    pub author_id: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            ticket_id: comment.ticket_id.to_string(),
            author_id: comment.author_id.to_string(),
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub id: String,
    pub tag: String,
    pub summary: String,
    pub steps: String,
    pub created_by: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub source_ticket_id: Option<String>,
    pub approved: bool,
    pub index_status: IndexStatus,
}

impl From<WorkflowSuggestion> for SuggestionResponse {
    fn from(s: WorkflowSuggestion) -> Self {
        Self {
            id: s.id.to_string(),
            tag: s.tag,
            summary: s.summary,
            steps: s.steps,
            created_by: s.created_by.to_string(),
            created_at: s.created_at,
            source_ticket_id: s.source_ticket_id.map(|id| id.to_string()),
            approved: s.approved,
            index_status: s.index_status,
        }
    }
}

/// A retrieved suggestion with both ranking signals.
#[derive(Debug, Serialize)]
pub struct SuggestedWorkflowResponse {
    pub id: String,
    pub tag: String,
    pub summary: String,
    pub steps: String,
    pub score: f64,
    pub helpful_count: usize,
}

impl From<RankedSuggestion> for SuggestedWorkflowResponse {
    fn from(ranked: RankedSuggestion) -> Self {
        Self {
            id: ranked.suggestion.id.to_string(),
            tag: ranked.suggestion.tag,
            summary: ranked.suggestion.summary,
            steps: ranked.suggestion.steps,
            score: ranked.score,
            helpful_count: ranked.helpful_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TopRatedResponse {
    #[serde(flatten)]
    pub suggestion: SuggestionResponse,
    pub helpful_count: usize,
}

impl From<RatedSuggestion> for TopRatedResponse {
    fn from(rated: RatedSuggestion) -> Self {
        Self {
            suggestion: rated.suggestion.into(),
            helpful_count: rated.helpful_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub id: String,
    pub workflow_id: String,
    pub author_id: String,
    pub helpful: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<WorkflowFeedback> for FeedbackResponse {
    fn from(feedback: WorkflowFeedback) -> Self {
        Self {
            id: feedback.id.to_string(),
            workflow_id: feedback.workflow_id.to_string(),
            author_id: feedback.author_id.to_string(),
            helpful: feedback.helpful,
            created_at: feedback.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContextItemResponse {
    pub file_name: String,
    pub chunk_id: u32,
    pub text: String,
    pub score: f64,
}

impl From<ContextItem> for ContextItemResponse {
    fn from(item: ContextItem) -> Self {
        Self {
            file_name: item.chunk.file_name,
            chunk_id: item.chunk.chunk_id,
            text: item.chunk.text,
            score: item.score,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatRespondResponse {
    /// Always empty; no answer text is generated.
    pub answer: String,
    pub context: Vec<ContextItemResponse>,
    pub workflow_suggestions: Vec<SuggestedWorkflowResponse>,
}

impl From<ChatAnswer> for ChatRespondResponse {
    fn from(answer: ChatAnswer) -> Self {
        Self {
            answer: answer.answer,
            context: answer.context.into_iter().map(Into::into).collect(),
            workflow_suggestions: answer
                .workflow_suggestions
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatEchoResponse {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct UploadDocumentResponse {
    pub inserted: usize,
}

#[derive(Debug, Serialize)]
pub struct UserActivityResponse {
    pub user_id: String,
    pub ticket_count: usize,
    /// Login tracking lives with the identity provider; always empty here.
    pub last_login: String,
}

impl From<UserActivity> for UserActivityResponse {
    fn from(activity: UserActivity) -> Self {
        Self {
            user_id: activity.user_id.to_string(),
            ticket_count: activity.ticket_count,
            last_login: String::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IndexStatusResponse {
    pub pending: usize,
    pub indexed: usize,
    pub failed: usize,
}

impl From<IndexStatusCounts> for IndexStatusResponse {
    fn from(counts: IndexStatusCounts) -> Self {
        Self {
            pending: counts.pending,
            indexed: counts.indexed,
            failed: counts.failed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unavailable: Vec<&'static str>,
}
