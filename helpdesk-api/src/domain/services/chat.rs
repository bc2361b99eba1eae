use std::sync::Arc;

use crate::domain::{
    models::{ContextItem, RankedSuggestion},
    ports::outbound::{DocumentIndex, Embedder},
    services::RetrievalEngine,
    SuggestionError,
};

/// Retrieved material for a chat question. `answer` stays empty: no text is generated.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatAnswer {
    pub answer: String,
    pub context: Vec<ContextItem>,
    pub workflow_suggestions: Vec<RankedSuggestion>,
}

pub struct ChatService {
    embedder: Arc<dyn Embedder>,
    documents: Option<Arc<dyn DocumentIndex>>,
    retrieval: Arc<RetrievalEngine>,
    suggestion_limit: usize,
    context_limit: usize,
}

impl ChatService {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        documents: Option<Arc<dyn DocumentIndex>>,
        retrieval: Arc<RetrievalEngine>,
        suggestion_limit: usize,
        context_limit: usize,
    ) -> Self {
        Self {
            embedder,
            documents,
            retrieval,
            suggestion_limit,
            context_limit,
        }
    }

    /// Embed the question once and use the vector for both document context and suggestions.
    pub async fn respond(&self, question: &str) -> Result<ChatAnswer, SuggestionError> {
        let vector = self.embedder.embed(question).await?;

        let context = match &self.documents {
            Some(documents) => documents.search(&vector, self.context_limit).await?,
            None => Vec::new(),
        };

        let workflow_suggestions = self
            .retrieval
            .suggest_for_vector(&vector, self.suggestion_limit)
            .await?;

        Ok(ChatAnswer {
            answer: String::new(),
            context,
            workflow_suggestions,
        })
    }
}
