use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{ports::outbound::Embedder, EmbeddingError};

#[derive(Serialize)]
struct EmbedRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    vector: Vec<f32>,
}

/// Client for the external text embedding service.
///
/// `POST {base_url}/embed-text` with `{"text": ...}` answers `{"vector": [...]}`.
#[derive(Clone)]
pub struct HttpEmbedder {
    http: reqwest::Client,
    base_url: String,
}

impl HttpEmbedder {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, EmbeddingError> {
        Url::parse(base_url)
            .map_err(|e| EmbeddingError::Unavailable(format!("invalid base url {base_url}: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EmbeddingError::Unavailable(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let url = format!("{}/embed-text", self.base_url);

        let resp = self
            .http
            .post(&url)
            .json(&EmbedRequest { text })
            .send()
            .await
            .map_err(|e| EmbeddingError::Unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| EmbeddingError::Unavailable(e.to_string()))?;

        let body = resp
            .json::<EmbedResponse>()
            .await
            .map_err(|e| EmbeddingError::Unavailable(format!("invalid embedding response: {e}")))?;

        if body.vector.is_empty() {
            return Err(EmbeddingError::Unavailable(
                "embedding service returned an empty vector".into(),
            ));
        }

        Ok(body.vector)
    }

    /// Reachable when the base URL answers without a server error.
    async fn health(&self) -> Result<(), EmbeddingError> {
        let resp = self
            .http
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| EmbeddingError::Unavailable(e.to_string()))?;

        if resp.status().is_server_error() {
            return Err(EmbeddingError::Unavailable(format!(
                "embedding service answered {}",
                resp.status()
            )));
        }
        Ok(())
    }
}
