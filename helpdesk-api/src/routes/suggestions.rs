use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    adapters::inbound::http::SuggestionResponse,
    app_state::AppState,
    auth::{AdminUser, AuthUser},
    domain::models::{SuggestionId, SuggestionInput},
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_suggestions).post(create_suggestion))
        .route(
            "/:id",
            get(get_suggestion)
                .put(update_suggestion)
                .delete(delete_suggestion),
        )
}

#[derive(Debug, Deserialize)]
struct TagQuery {
    tag: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SuggestionPayload {
    tag: String,
    summary: String,
    steps: String,
}

impl From<SuggestionPayload> for SuggestionInput {
    fn from(payload: SuggestionPayload) -> Self {
        Self {
            tag: payload.tag,
            summary: payload.summary,
            steps: payload.steps,
        }
    }
}

#[instrument(name = "GET /suggestions", skip(app_state))]
async fn list_suggestions(
    _user: AuthUser,
    State(app_state): State<AppState>,
    Query(query): Query<TagQuery>,
) -> Json<Vec<SuggestionResponse>> {
    let suggestions = app_state
        .suggestion_service
        .list_approved(query.tag.as_deref())
        .await;

    Json(suggestions.into_iter().map(Into::into).collect())
}

#[instrument(name = "GET /suggestions/:id", skip(app_state))]
async fn get_suggestion(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuggestionResponse>, ApiError> {
    let suggestion = app_state
        .suggestion_service
        .get_visible(user.identity(), &SuggestionId::new(id))
        .await?;

    Ok(Json(suggestion.into()))
}

/// Stored unapproved. An indexing failure is reflected in `index_status`, not in the status code.
#[instrument(name = "POST /suggestions", skip(app_state))]
async fn create_suggestion(
    user: AuthUser,
    State(app_state): State<AppState>,
    Json(body): Json<SuggestionPayload>,
) -> Result<(StatusCode, Json<SuggestionResponse>), ApiError> {
    let suggestion = app_state
        .suggestion_service
        .create(body.into(), user.user_id.clone())
        .await?;

    Ok((StatusCode::CREATED, Json(suggestion.into())))
}

#[instrument(name = "PUT /suggestions/:id", skip(app_state))]
async fn update_suggestion(
    _admin: AdminUser,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<SuggestionPayload>,
) -> Result<Json<SuggestionResponse>, ApiError> {
    let suggestion = app_state
        .suggestion_service
        .update(&SuggestionId::new(id), body.into())
        .await?;

    Ok(Json(suggestion.into()))
}

#[instrument(name = "DELETE /suggestions/:id", skip(app_state))]
async fn delete_suggestion(
    _admin: AdminUser,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    app_state
        .suggestion_service
        .delete(&SuggestionId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
