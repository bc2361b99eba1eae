mod document_index;
mod embedder;
mod stores;
mod suggestion_index;

pub use document_index::*;
pub use embedder::*;
pub use stores::*;
pub use suggestion_index::*;

#[cfg(test)]
pub mod mock;
