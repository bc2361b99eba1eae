//! In-memory test doubles for the outbound gateway ports.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;

use super::{DocumentIndex, Embedder, IndexHit, SuggestionIndex};
use crate::domain::{
    models::{ContextItem, DocumentChunk, SuggestionId, WorkflowSuggestion},
    EmbeddingError, IndexError,
};

/// Embedder returning canned results in sequence.
///
/// ```ignore
/// let embedder = MockEmbedder::returning(vec![0.1, 0.2]);
/// let flaky = MockEmbedder::with_results(vec![Err(unavailable()), Ok(vec![1.0])]);
/// ```
#[derive(Clone)]
pub struct MockEmbedder {
    responses: Arc<Vec<Result<Vec<f32>, EmbeddingError>>>,
    call_count: Arc<AtomicUsize>,
    texts: Arc<Mutex<Vec<String>>>,
    delay: Arc<Mutex<Option<Duration>>>,
}

impl MockEmbedder {
    /// Always return the same vector.
    pub fn returning(vector: Vec<f32>) -> Self {
        Self::with_results(vec![Ok(vector)])
    }

    /// Always fail with `Unavailable`.
    pub fn failing() -> Self {
        Self::with_results(vec![Err(EmbeddingError::Unavailable(
            "connection refused".into(),
        ))])
    }

    /// Return results in order, wrapping around once exhausted.
    pub fn with_results(responses: Vec<Result<Vec<f32>, EmbeddingError>>) -> Self {
        Self {
            responses: Arc::new(responses),
            call_count: Arc::new(AtomicUsize::new(0)),
            texts: Arc::new(Mutex::new(Vec::new())),
            delay: Arc::default(),
        }
    }

    /// Sleep this long inside every `embed` call.
    pub fn with_delay(self, delay: Duration) -> Self {
        self.set_delay(Some(delay));
        self
    }

    /// Change the delay for calls made from now on.
    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock().unwrap() = delay;
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Every text passed to `embed`, in call order.
    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::returning(vec![0.5; 4])
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
        self.texts.lock().unwrap().push(text.to_string());
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.responses[idx % self.responses.len()].clone()
    }
}

/// Suggestion index that records upserts and serves canned search hits.
#[derive(Clone, Default)]
pub struct MockSuggestionIndex {
    points: Arc<Mutex<HashMap<SuggestionId, (Vec<f32>, WorkflowSuggestion)>>>,
    hits: Arc<Mutex<Vec<IndexHit>>>,
    searches: Arc<Mutex<Vec<(usize, f32)>>>,
    upsert_count: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl MockSuggestionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search returns these hits, truncated to the requested limit.
    pub fn with_hits(hits: Vec<IndexHit>) -> Self {
        let index = Self::default();
        *index.hits.lock().unwrap() = hits;
        index
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn upsert_count(&self) -> usize {
        self.upsert_count.load(Ordering::SeqCst)
    }

    /// The suggestion snapshot last upserted under `id`.
    pub fn point(&self, id: &SuggestionId) -> Option<(Vec<f32>, WorkflowSuggestion)> {
        self.points.lock().unwrap().get(id).cloned()
    }

    /// `(limit, score_threshold)` of every search, in call order.
    pub fn searches(&self) -> Vec<(usize, f32)> {
        self.searches.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), IndexError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(IndexError::Unavailable("503 Service Unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl SuggestionIndex for MockSuggestionIndex {
    async fn upsert(
        &self,
        suggestion: &WorkflowSuggestion,
        vector: Vec<f32>,
    ) -> Result<(), IndexError> {
        self.upsert_count.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.points
            .lock()
            .unwrap()
            .insert(suggestion.id.clone(), (vector, suggestion.clone()));
        Ok(())
    }

    async fn search(
        &self,
        _vector: &[f32],
        limit: usize,
        score_threshold: f32,
    ) -> Result<Vec<IndexHit>, IndexError> {
        self.searches.lock().unwrap().push((limit, score_threshold));
        self.check()?;
        Ok(self.hits.lock().unwrap().iter().take(limit).cloned().collect())
    }

    async fn health(&self) -> Result<(), IndexError> {
        self.check()
    }
}

/// Document index keeping chunks in memory. Search returns them all with score 1.0.
#[derive(Clone, Default)]
pub struct MockDocumentIndex {
    chunks: Arc<Mutex<Vec<(DocumentChunk, Vec<f32>)>>>,
}

impl MockDocumentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chunks(&self) -> Vec<DocumentChunk> {
        self.chunks
            .lock()
            .unwrap()
            .iter()
            .map(|(chunk, _)| chunk.clone())
            .collect()
    }
}

#[async_trait]
impl DocumentIndex for MockDocumentIndex {
    async fn upsert_chunks(
        &self,
        chunks: Vec<(DocumentChunk, Vec<f32>)>,
    ) -> Result<usize, IndexError> {
        let count = chunks.len();
        self.chunks.lock().unwrap().extend(chunks);
        Ok(count)
    }

    async fn search(&self, _vector: &[f32], limit: usize) -> Result<Vec<ContextItem>, IndexError> {
        Ok(self
            .chunks
            .lock()
            .unwrap()
            .iter()
            .take(limit)
            .map(|(chunk, _)| ContextItem {
                chunk: chunk.clone(),
                score: 1.0,
            })
            .collect())
    }
}
