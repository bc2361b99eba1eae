//! Process-local record stores. Contents are lost on restart.

mod comment_store;
mod feedback_store;
mod seed;
mod suggestion_store;
mod ticket_store;

pub use comment_store::InMemoryCommentStore;
pub use feedback_store::InMemoryFeedbackStore;
pub use seed::seed_sample_tickets;
pub use suggestion_store::InMemorySuggestionStore;
pub use ticket_store::InMemoryTicketStore;
