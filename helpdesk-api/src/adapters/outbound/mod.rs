mod embed_service;
pub mod memory;
mod vector_index;

pub use embed_service::HttpEmbedder;
pub use vector_index::{QdrantDocumentIndex, QdrantSuggestionIndex, SuggestionPayload};
