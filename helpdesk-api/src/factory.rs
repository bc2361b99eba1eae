//! Composition root.
//!
//! The only place that picks concrete outbound adapters for the domain ports.

use std::sync::Arc;

use thiserror::Error;
use vector_index::{VectorIndexClient, VectorIndexError};

use crate::{
    adapters::outbound::{
        memory::{
            InMemoryCommentStore, InMemoryFeedbackStore, InMemorySuggestionStore,
            InMemoryTicketStore,
        },
        HttpEmbedder, QdrantDocumentIndex, QdrantSuggestionIndex,
    },
    app_state::AppState,
    config::Settings,
    domain::{
        ports::outbound::{DocumentIndex, Embedder, SuggestionIndex},
        services::{
            ChatService, DocumentService, FeedbackService, PromotionScanner, RetrievalEngine,
            SuggestionService, TicketService,
        },
        EmbeddingError,
    },
};

#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("invalid embedding service settings: {0}")]
    Embedding(#[from] EmbeddingError),
    #[error("invalid vector index settings: {0}")]
    VectorIndex(#[from] VectorIndexError),
}

/// Everything `main` needs to serve requests and run the promotion worker.
pub struct Components {
    pub app_state: AppState,
    pub promotion_scanner: Arc<PromotionScanner>,
    pub ticket_store: Arc<InMemoryTicketStore>,
}

pub fn build(settings: &Settings) -> Result<Components, FactoryError> {
    let embedder: Arc<dyn Embedder> = Arc::new(HttpEmbedder::new(
        &settings.embedding.base_url,
        settings.embedding.timeout(),
    )?);

    let index_client = VectorIndexClient::new(
        &settings.vector_index.base_url,
        settings.vector_index.timeout(),
    )?
    .with_api_key(settings.vector_index.api_key.clone());

    let suggestion_index: Arc<dyn SuggestionIndex> = Arc::new(QdrantSuggestionIndex::new(
        index_client.clone(),
        settings.vector_index.suggestions_collection.clone(),
    ));
    let document_index: Option<Arc<dyn DocumentIndex>> = settings
        .vector_index
        .documents_collection
        .clone()
        .map(|collection| {
            Arc::new(QdrantDocumentIndex::new(index_client, collection)) as Arc<dyn DocumentIndex>
        });

    let ticket_store = Arc::new(InMemoryTicketStore::new());
    let comment_store = Arc::new(InMemoryCommentStore::new());
    let suggestion_store = Arc::new(InMemorySuggestionStore::new());
    let feedback_store = Arc::new(InMemoryFeedbackStore::new());

    let suggestion_service = Arc::new(SuggestionService::new(
        suggestion_store.clone(),
        embedder.clone(),
        suggestion_index.clone(),
    ));
    let retrieval_engine = Arc::new(RetrievalEngine::new(
        embedder.clone(),
        suggestion_index.clone(),
        suggestion_store.clone(),
        feedback_store.clone(),
    ));
    let chat_service = Arc::new(ChatService::new(
        embedder.clone(),
        document_index.clone(),
        retrieval_engine.clone(),
        settings.retrieval.chat_limit,
        settings.retrieval.context_limit,
    ));
    let document_service = document_index
        .map(|index| Arc::new(DocumentService::new(embedder.clone(), index)));

    let promotion_scanner = Arc::new(PromotionScanner::new(
        ticket_store.clone(),
        suggestion_service.clone(),
    ));

    let app_state = AppState {
        ticket_service: Arc::new(TicketService::new(ticket_store.clone(), comment_store)),
        suggestion_service,
        retrieval_engine,
        feedback_service: Arc::new(FeedbackService::new(feedback_store, suggestion_store)),
        chat_service,
        document_service,
        embedder,
        suggestion_index,
        retrieval: settings.retrieval.clone(),
    };

    Ok(Components {
        app_state,
        promotion_scanner,
        ticket_store,
    })
}
