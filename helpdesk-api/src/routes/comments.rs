use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    adapters::inbound::http::CommentResponse,
    app_state::AppState,
    auth::{AdminUser, AuthUser},
    domain::models::{CommentId, TicketId},
    routes::ApiError,
};

/// Comment routes, nested under `/tickets`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:id/comments", get(list_comments).post(add_comment))
        .route("/:id/comments/:comment_id", delete(delete_comment))
}

#[derive(Debug, Deserialize)]
struct CommentPayload {
    content: String,
}

#[instrument(name = "GET /tickets/:id/comments", skip(app_state))]
async fn list_comments(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CommentResponse>>, ApiError> {
    let comments = app_state
        .ticket_service
        .comments(user.identity(), &TicketId::new(id))
        .await?;

    Ok(Json(comments.into_iter().map(Into::into).collect()))
}

#[instrument(name = "POST /tickets/:id/comments", skip(app_state))]
async fn add_comment(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<CommentPayload>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let comment = app_state
        .ticket_service
        .add_comment(user.identity(), &TicketId::new(id), body.content)
        .await?;

    Ok((StatusCode::CREATED, Json(comment.into())))
}

#[instrument(name = "DELETE /tickets/:id/comments/:comment_id", skip(app_state))]
async fn delete_comment(
    _admin: AdminUser,
    State(app_state): State<AppState>,
    Path((id, comment_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    app_state
        .ticket_service
        .delete_comment(&TicketId::new(id), &CommentId::new(comment_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
