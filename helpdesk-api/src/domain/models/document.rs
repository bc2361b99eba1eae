use serde::{Deserialize, Serialize};

/// A slice of an uploaded document, stored in the documents collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub file_name: String,
    pub chunk_id: u32,
    pub text: String,
}

/// A document chunk returned as chat context.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextItem {
    pub chunk: DocumentChunk,
    pub score: f64,
}
