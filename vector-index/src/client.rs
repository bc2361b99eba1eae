use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use url::Url;

use crate::point::{Point, RawScoredPoint, ScoredPoint, SearchRequest, SearchResponse, UpsertBody};

const API_KEY_HEADER: &str = "api-key";

/// REST client for a vector similarity index (collections of points).
///
/// Every request carries the timeout given at construction.
#[derive(Debug, Clone)]
pub struct VectorIndexClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl VectorIndexClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, VectorIndexError> {
        Url::parse(base_url).map_err(|e| VectorIndexError::InvalidUrl(e.to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VectorIndexError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
        })
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upsert points and wait until the write is durable.
    pub async fn upsert<P: Serialize>(
        &self,
        collection: &str,
        points: &[Point<P>],
    ) -> Result<(), VectorIndexError> {
        let url = format!(
            "{}/collections/{}/points?wait=true",
            self.base_url, collection
        );

        let resp = self
            .request(reqwest::Method::POST, &url)
            .json(&UpsertBody { points })
            .send()
            .await
            .map_err(|e| VectorIndexError::Transport(e.to_string()))?;

        Self::check_status(resp).await?;

        tracing::debug!(collection, count = points.len(), "Upserted points");
        Ok(())
    }

    /// Nearest-neighbour search. Hits come back in the index's own score order.
    pub async fn search<P: DeserializeOwned + Default>(
        &self,
        collection: &str,
        request: &SearchRequest<'_>,
    ) -> Result<Vec<ScoredPoint<P>>, VectorIndexError> {
        let url = format!("{}/collections/{}/points/search", self.base_url, collection);

        let resp = self
            .request(reqwest::Method::POST, &url)
            .json(request)
            .send()
            .await
            .map_err(|e| VectorIndexError::Transport(e.to_string()))?;

        let resp = Self::check_status(resp).await?;

        let body = resp
            .json::<SearchResponse>()
            .await
            .map_err(|e| VectorIndexError::Decode(e.to_string()))?;

        Ok(body
            .result
            .into_iter()
            .map(RawScoredPoint::decode)
            .collect())
    }

    /// Cheap reachability probe (lists collections).
    pub async fn health(&self) -> Result<(), VectorIndexError> {
        let url = format!("{}/collections", self.base_url);

        let resp = self
            .request(reqwest::Method::GET, &url)
            .send()
            .await
            .map_err(|e| VectorIndexError::Transport(e.to_string()))?;

        Self::check_status(resp).await.map(|_| ())
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.api_key {
            Some(key) => builder.header(API_KEY_HEADER, key),
            None => builder,
        }
    }

    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, VectorIndexError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(VectorIndexError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[derive(Error, Debug)]
pub enum VectorIndexError {
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Decode error: {0}")]
    Decode(String),
}
