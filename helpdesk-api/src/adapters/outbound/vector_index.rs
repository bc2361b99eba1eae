//! Vector index adapters for suggestions and document chunks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError};
use vector_index::{Point, SearchRequest, VectorIndexClient};

use crate::domain::{
    models::{ContextItem, DocumentChunk, SuggestionId, WorkflowSuggestion},
    ports::outbound::{DocumentIndex, IndexHit, SuggestionIndex},
    IndexError,
};

/// Metadata stored with each suggestion point.
///
/// Every field defaults when absent or of the wrong JSON type.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionPayload {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub tag: String,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub summary: String,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub steps: String,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub created_by: String,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub source_ticket_id: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub approved: bool,
}

impl From<&WorkflowSuggestion> for SuggestionPayload {
    fn from(s: &WorkflowSuggestion) -> Self {
        Self {
            tag: s.tag.clone(),
            summary: s.summary.clone(),
            steps: s.steps.clone(),
            created_by: s.created_by.to_string(),
            source_ticket_id: s.source_ticket_id.as_ref().map(ToString::to_string),
            approved: s.approved,
        }
    }
}

pub struct QdrantSuggestionIndex {
    client: VectorIndexClient,
    collection: String,
}

impl QdrantSuggestionIndex {
    pub fn new(client: VectorIndexClient, collection: impl Into<String>) -> Self {
        Self {
            client,
            collection: collection.into(),
        }
    }
}

#[async_trait]
impl SuggestionIndex for QdrantSuggestionIndex {
    async fn upsert(
        &self,
        suggestion: &WorkflowSuggestion,
        vector: Vec<f32>,
    ) -> Result<(), IndexError> {
        let point = Point::new(
            suggestion.id.as_str(),
            vector,
            SuggestionPayload::from(suggestion),
        );
        self.client.upsert(&self.collection, &[point]).await?;
        Ok(())
    }

    async fn search(
        &self,
        vector: &[f32],
        limit: usize,
        score_threshold: f32,
    ) -> Result<Vec<IndexHit>, IndexError> {
        let request = SearchRequest::new(vector, limit).with_score_threshold(score_threshold);
        let hits = self
            .client
            .search::<SuggestionPayload>(&self.collection, &request)
            .await?;

        Ok(hits
            .into_iter()
            .map(|hit| IndexHit {
                id: SuggestionId::new(hit.id.to_string()),
                score: hit.score,
            })
            .collect())
    }

    async fn health(&self) -> Result<(), IndexError> {
        Ok(self.client.health().await?)
    }
}

#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct DocumentPayload {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    file_name: String,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    chunk_id: u32,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    text: String,
}

impl From<DocumentChunk> for DocumentPayload {
    fn from(chunk: DocumentChunk) -> Self {
        Self {
            file_name: chunk.file_name,
            chunk_id: chunk.chunk_id,
            text: chunk.text,
        }
    }
}

impl From<DocumentPayload> for DocumentChunk {
    fn from(payload: DocumentPayload) -> Self {
        Self {
            file_name: payload.file_name,
            chunk_id: payload.chunk_id,
            text: payload.text,
        }
    }
}

/// Document chunks for chat context. Each chunk gets a fresh random point id.
pub struct QdrantDocumentIndex {
    client: VectorIndexClient,
    collection: String,
}

impl QdrantDocumentIndex {
    pub fn new(client: VectorIndexClient, collection: impl Into<String>) -> Self {
        Self {
            client,
            collection: collection.into(),
        }
    }
}

#[async_trait]
impl DocumentIndex for QdrantDocumentIndex {
    async fn upsert_chunks(
        &self,
        chunks: Vec<(DocumentChunk, Vec<f32>)>,
    ) -> Result<usize, IndexError> {
        let points: Vec<_> = chunks
            .into_iter()
            .map(|(chunk, vector)| {
                Point::new(
                    uuid::Uuid::new_v4().to_string(),
                    vector,
                    DocumentPayload::from(chunk),
                )
            })
            .collect();

        if points.is_empty() {
            return Ok(0);
        }

        self.client.upsert(&self.collection, &points).await?;
        Ok(points.len())
    }

    async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<ContextItem>, IndexError> {
        let request = SearchRequest::new(vector, limit);
        let hits = self
            .client
            .search::<DocumentPayload>(&self.collection, &request)
            .await?;

        Ok(hits
            .into_iter()
            .map(|hit| ContextItem {
                chunk: hit.payload.into(),
                score: hit.score,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::{
        matchers::{body_partial_json, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::domain::models::sample_ticket;

    fn client(server: &MockServer) -> VectorIndexClient {
        VectorIndexClient::new(&server.uri(), Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn payload_tolerates_wrong_types_per_field() {
        let payload: SuggestionPayload = serde_json::from_value(json!({
            "tag": 42,
            "summary": "Disk full",
            "approved": "yes",
            "source_ticket_id": null
        }))
        .unwrap();

        assert_eq!(
            payload,
            SuggestionPayload {
                summary: "Disk full".into(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn payload_mirrors_suggestion() {
        let mut suggestion = WorkflowSuggestion::from_ticket(&sample_ticket("t1", "resolved", "fix"));
        suggestion.approved = true;

        let payload = serde_json::to_value(SuggestionPayload::from(&suggestion)).unwrap();
        assert_eq!(
            payload,
            json!({
                "tag": "ops",
                "summary": "Ticket t1: Service keeps crashing",
                "steps": "fix",
                "created_by": "alice",
                "source_ticket_id": "t1",
                "approved": true
            })
        );
    }

    #[tokio::test]
    async fn upsert_uses_suggestion_id_as_point_id() {
        let server = MockServer::start().await;
        let suggestion = WorkflowSuggestion::from_ticket(&sample_ticket("t1", "resolved", "fix"));

        Mock::given(method("POST"))
            .and(path("/collections/workflow_suggestions/points"))
            .and(query_param("wait", "true"))
            .and(body_partial_json(json!({
                "points": [{ "id": suggestion.id.as_str(), "vector": [0.5] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
            .expect(1)
            .mount(&server)
            .await;

        let index = QdrantSuggestionIndex::new(client(&server), "workflow_suggestions");
        index.upsert(&suggestion, vec![0.5]).await.unwrap();
    }

    #[tokio::test]
    async fn search_maps_ids_and_passes_threshold() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/collections/workflow_suggestions/points/search"))
            .and(body_partial_json(json!({
                "limit": 9,
                "with_payload": true,
                "score_threshold": 0.0
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": [
                    { "id": "abc", "payload": { "tag": "ops" }, "score": 0.9 },
                    { "id": 17, "payload": "garbage", "score": 0.4 }
                ]
            })))
            .mount(&server)
            .await;

        let index = QdrantSuggestionIndex::new(client(&server), "workflow_suggestions");
        let hits = index.search(&[0.1, 0.2], 9, 0.0).await.unwrap();

        assert_eq!(
            hits,
            vec![
                IndexHit {
                    id: SuggestionId::new("abc"),
                    score: 0.9
                },
                IndexHit {
                    id: SuggestionId::new("17"),
                    score: 0.4
                },
            ]
        );
    }

    #[tokio::test]
    async fn index_errors_become_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let index = QdrantSuggestionIndex::new(client(&server), "workflow_suggestions");
        let err = index.search(&[0.1], 3, 0.0).await.unwrap_err();
        assert!(matches!(err, IndexError::Unavailable(_)));
    }

    #[tokio::test]
    async fn document_search_decodes_chunks() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/collections/documents/points/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": [
                    {
                        "id": "5a8c1f0e-2f4b-4c59-9a55-0d3b0b4a7e11",
                        "payload": { "file_name": "vpn.md", "chunk_id": 2, "text": "Renew it." },
                        "score": 0.7
                    },
                    { "id": 3, "score": 0.1 }
                ]
            })))
            .mount(&server)
            .await;

        let index = QdrantDocumentIndex::new(client(&server), "documents");
        let items = index.search(&[0.3], 5).await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].chunk,
            DocumentChunk {
                file_name: "vpn.md".into(),
                chunk_id: 2,
                text: "Renew it.".into()
            }
        );
        assert_eq!(items[1].chunk, DocumentChunk::default());
    }

    #[tokio::test]
    async fn document_upsert_sends_all_chunks() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/collections/documents/points"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let index = QdrantDocumentIndex::new(client(&server), "documents");
        let chunk = |id| DocumentChunk {
            file_name: "a.md".into(),
            chunk_id: id,
            text: "t".into(),
        };
        let inserted = index
            .upsert_chunks(vec![(chunk(0), vec![0.1]), (chunk(1), vec![0.2])])
            .await
            .unwrap();
        assert_eq!(inserted, 2);
        assert_eq!(index.upsert_chunks(vec![]).await.unwrap(), 0);
    }
}
