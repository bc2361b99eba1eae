mod chat;
mod documents;
mod feedback;
mod promotion;
mod retrieval;
mod suggestions;
mod tickets;

pub use chat::{ChatAnswer, ChatService};
pub use documents::{chunk_sentences, clean_text, DocumentService, SENTENCES_PER_CHUNK};
pub use feedback::FeedbackService;
pub use promotion::{PromotionScanner, PromotionStats};
pub use retrieval::{rank, RetrievalEngine, OVERFETCH_FACTOR, SCORE_THRESHOLD};
pub use suggestions::{IndexStatusCounts, RetryStats, SuggestionService};
pub use tickets::TicketService;
