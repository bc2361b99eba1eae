use std::sync::Arc;

use crate::{
    config::RetrievalSettings,
    domain::{
        ports::outbound::{Embedder, SuggestionIndex},
        services::{
            ChatService, DocumentService, FeedbackService, RetrievalEngine, SuggestionService,
            TicketService,
        },
    },
};

#[derive(Clone)]
pub struct AppState {
    pub ticket_service: Arc<TicketService>,
    pub suggestion_service: Arc<SuggestionService>,
    pub retrieval_engine: Arc<RetrievalEngine>,
    pub feedback_service: Arc<FeedbackService>,
    pub chat_service: Arc<ChatService>,
    /// Absent when no documents collection is configured.
    pub document_service: Option<Arc<DocumentService>>,
    pub embedder: Arc<dyn Embedder>,
    pub suggestion_index: Arc<dyn SuggestionIndex>,
    pub retrieval: RetrievalSettings,
}
