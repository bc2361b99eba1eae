use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    adapters::inbound::http::{FeedbackResponse, TopRatedResponse},
    app_state::AppState,
    auth::{AdminUser, AuthUser},
    domain::models::{FeedbackId, SuggestionId},
    routes::ApiError,
};

const TOP_RATED_DEFAULT_LIMIT: usize = 5;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/top-rated", get(top_rated))
        .route(
            "/:workflow_id/feedback",
            get(list_feedback).post(submit_feedback),
        )
        .route("/:workflow_id/feedback/:feedback_id", delete(delete_feedback))
}

#[derive(Debug, Deserialize)]
struct FeedbackPayload {
    helpful: bool,
}

#[derive(Debug, Deserialize)]
struct TopRatedQuery {
    limit: Option<usize>,
}

#[instrument(name = "GET /workflows/:workflow_id/feedback", skip(app_state))]
async fn list_feedback(
    _user: AuthUser,
    State(app_state): State<AppState>,
    Path(workflow_id): Path<String>,
) -> Json<Vec<FeedbackResponse>> {
    let feedback = app_state
        .feedback_service
        .list(&SuggestionId::new(workflow_id))
        .await;

    Json(feedback.into_iter().map(Into::into).collect())
}

#[instrument(name = "POST /workflows/:workflow_id/feedback", skip(app_state))]
async fn submit_feedback(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(workflow_id): Path<String>,
    Json(body): Json<FeedbackPayload>,
) -> Result<(StatusCode, Json<FeedbackResponse>), ApiError> {
    let feedback = app_state
        .feedback_service
        .submit(
            SuggestionId::new(workflow_id),
            user.user_id.clone(),
            body.helpful,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(feedback.into())))
}

#[instrument(
    name = "DELETE /workflows/:workflow_id/feedback/:feedback_id",
    skip(app_state)
)]
async fn delete_feedback(
    _admin: AdminUser,
    State(app_state): State<AppState>,
    Path((workflow_id, feedback_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    app_state
        .feedback_service
        .delete(
            &SuggestionId::new(workflow_id),
            &FeedbackId::new(feedback_id),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[instrument(name = "GET /workflows/top-rated", skip(app_state))]
async fn top_rated(
    _user: AuthUser,
    State(app_state): State<AppState>,
    Query(query): Query<TopRatedQuery>,
) -> Json<Vec<TopRatedResponse>> {
    let limit = query
        .limit
        .unwrap_or(TOP_RATED_DEFAULT_LIMIT)
        .min(app_state.retrieval.max_limit);
    let rated = app_state.feedback_service.top_rated(limit).await;

    Json(rated.into_iter().map(Into::into).collect())
}
