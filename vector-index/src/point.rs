use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Identifier of a point in a collection.
///
/// The index accepts UUID strings or unsigned integers and echoes back whichever
/// form the point was stored with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointId {
    Uuid(String),
    Num(u64),
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointId::Uuid(id) => write!(f, "{}", id),
            PointId::Num(id) => write!(f, "{}", id),
        }
    }
}

impl From<String> for PointId {
    fn from(id: String) -> Self {
        Self::Uuid(id)
    }
}

impl From<&str> for PointId {
    fn from(id: &str) -> Self {
        Self::Uuid(id.to_string())
    }
}

impl From<u64> for PointId {
    fn from(id: u64) -> Self {
        Self::Num(id)
    }
}

/// A point to upsert: id, dense vector and metadata payload.
#[derive(Debug, Clone, Serialize)]
pub struct Point<P: Serialize> {
    pub id: PointId,
    pub vector: Vec<f32>,
    pub payload: P,
}

impl<P: Serialize> Point<P> {
    pub fn new(id: impl Into<PointId>, vector: Vec<f32>, payload: P) -> Self {
        Self {
            id: id.into(),
            vector,
            payload,
        }
    }
}

/// A search hit with its decoded payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPoint<P> {
    pub id: PointId,
    pub payload: P,
    /// Similarity score, higher is more similar.
    pub score: f64,
}

/// Search parameters. `score_threshold` of `None` leaves filtering to the index.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    pub vector: &'a [f32],
    pub limit: usize,
    pub with_payload: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_threshold: Option<f32>,
}

impl<'a> SearchRequest<'a> {
    pub fn new(vector: &'a [f32], limit: usize) -> Self {
        Self {
            vector,
            limit,
            with_payload: true,
            score_threshold: None,
        }
    }

    pub fn with_score_threshold(mut self, threshold: f32) -> Self {
        self.score_threshold = Some(threshold);
        self
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpsertBody<'a, P: Serialize> {
    pub points: &'a [Point<P>],
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub result: Vec<RawScoredPoint>,
}

/// Hit as it comes off the wire. The payload is kept untyped until
/// [`RawScoredPoint::decode`] so a single odd payload cannot fail the whole response.
#[derive(Debug, Deserialize)]
pub(crate) struct RawScoredPoint {
    pub id: PointId,
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
    pub score: f64,
}

impl RawScoredPoint {
    pub fn decode<P: DeserializeOwned + Default>(self) -> ScoredPoint<P> {
        let payload = match self.payload {
            Some(value @ serde_json::Value::Object(_)) => {
                serde_json::from_value(value).unwrap_or_else(|e| {
                    tracing::debug!(id = %self.id, error = %e, "Unreadable payload, using default");
                    P::default()
                })
            }
            _ => P::default(),
        };

        ScoredPoint {
            id: self.id,
            payload,
            score: self.score,
        }
    }
}
