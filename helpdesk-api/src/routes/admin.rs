use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    adapters::inbound::http::{
        IndexStatusResponse, SuggestionResponse, TicketResponse, UserActivityResponse,
    },
    app_state::AppState,
    auth::AdminUser,
    domain::models::SuggestionId,
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/workflows/pending", get(pending_workflows))
        .route("/workflows/:id/approve", post(approve_workflow))
        .route("/tickets", get(all_tickets))
        .route("/user-activity", get(user_activity))
        .route("/suggestions/index-status", get(index_status))
}

#[instrument(name = "GET /admin/workflows/pending", skip(app_state))]
async fn pending_workflows(
    _admin: AdminUser,
    State(app_state): State<AppState>,
) -> Json<Vec<SuggestionResponse>> {
    let pending = app_state.suggestion_service.list_pending().await;
    Json(pending.into_iter().map(Into::into).collect())
}

#[instrument(name = "POST /admin/workflows/:id/approve", skip(app_state))]
async fn approve_workflow(
    _admin: AdminUser,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuggestionResponse>, ApiError> {
    let suggestion = app_state
        .suggestion_service
        .approve(&SuggestionId::new(id))
        .await?;

    Ok(Json(suggestion.into()))
}

#[instrument(name = "GET /admin/tickets", skip(app_state))]
async fn all_tickets(
    _admin: AdminUser,
    State(app_state): State<AppState>,
) -> Json<Vec<TicketResponse>> {
    let tickets = app_state.ticket_service.list_all().await;
    Json(tickets.into_iter().map(Into::into).collect())
}

#[instrument(name = "GET /admin/user-activity", skip(app_state))]
async fn user_activity(
    _admin: AdminUser,
    State(app_state): State<AppState>,
) -> Json<Vec<UserActivityResponse>> {
    let activity = app_state.ticket_service.user_activity().await;
    Json(activity.into_iter().map(Into::into).collect())
}

#[instrument(name = "GET /admin/suggestions/index-status", skip(app_state))]
async fn index_status(
    _admin: AdminUser,
    State(app_state): State<AppState>,
) -> Json<IndexStatusResponse> {
    Json(app_state.suggestion_service.index_status_counts().await.into())
}
