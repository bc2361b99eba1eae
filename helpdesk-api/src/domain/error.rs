use thiserror::Error;

/// Errors from the keyed in-memory stores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: String },
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn already_exists(entity: &'static str, id: impl ToString) -> Self {
        Self::AlreadyExists {
            entity,
            id: id.to_string(),
        }
    }
}

/// The embedding service could not produce a vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbeddingError {
    #[error("embedding service unavailable: {0}")]
    Unavailable(String),
}

/// The vector index could not be reached or rejected the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("vector index unavailable: {0}")]
    Unavailable(String),
}

impl From<vector_index::VectorIndexError> for IndexError {
    fn from(err: vector_index::VectorIndexError) -> Self {
        Self::Unavailable(err.to_string())
    }
}

/// Errors from suggestion management and retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuggestionError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    EmbeddingUnavailable(String),
    #[error("{0}")]
    IndexUnavailable(String),
}

impl From<StoreError> for SuggestionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            StoreError::AlreadyExists { .. } => Self::Conflict(err.to_string()),
        }
    }
}

impl From<EmbeddingError> for SuggestionError {
    fn from(err: EmbeddingError) -> Self {
        Self::EmbeddingUnavailable(err.to_string())
    }
}

impl From<IndexError> for SuggestionError {
    fn from(err: IndexError) -> Self {
        Self::IndexUnavailable(err.to_string())
    }
}

/// Errors from ticket and comment operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TicketError {
    #[error("{0}")]
    NotFound(String),
    #[error("forbidden: {0}")]
    Forbidden(&'static str),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    Conflict(String),
}

impl From<StoreError> for TicketError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            StoreError::AlreadyExists { .. } => Self::Conflict(err.to_string()),
        }
    }
}

/// Errors from document ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("document contains no text")]
    Empty,
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
    #[error(transparent)]
    Index(#[from] IndexError),
}
