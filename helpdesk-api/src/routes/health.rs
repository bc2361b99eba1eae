use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{instrument, warn};

use crate::{adapters::inbound::http::HealthResponse, app_state::AppState};

const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health))
}

/// Probes both retrieval dependencies concurrently. 503 lists the ones that did not answer.
#[instrument(name = "GET /healthz", skip(app_state))]
async fn health(State(app_state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let index_probe = tokio::time::timeout(PROBE_TIMEOUT, app_state.suggestion_index.health());
    let embedder_probe = tokio::time::timeout(PROBE_TIMEOUT, app_state.embedder.health());
    let (index, embedder) = futures::join!(index_probe, embedder_probe);

    let mut unavailable = Vec::new();
    if !matches!(index, Ok(Ok(()))) {
        warn!("Vector index health probe failed");
        unavailable.push("vector_index");
    }
    if !matches!(embedder, Ok(Ok(()))) {
        warn!("Embedding service health probe failed");
        unavailable.push("embedding_service");
    }

    if unavailable.is_empty() {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                unavailable,
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unavailable",
                unavailable,
            }),
        )
    }
}
