use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    adapters::inbound::http::{SuggestedWorkflowResponse, TicketDetailResponse, TicketResponse},
    app_state::AppState,
    auth::AuthUser,
    domain::models::{TicketId, TicketInput, UserId},
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tickets).post(create_ticket))
        .route(
            "/:id",
            get(get_ticket).put(update_ticket).delete(delete_ticket),
        )
        .route("/:id/suggested-workflows", get(suggested_workflows))
}

#[derive(Debug, Deserialize)]
struct ListTicketsQuery {
    assigned_to: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TicketPayload {
    title: String,
    description: String,
    category: String,
    #[serde(default = "default_status")]
    status: String,
    #[serde(default)]
    resolution: String,
    #[serde(default)]
    assigned_to: Option<String>,
}

fn default_status() -> String {
    "open".to_string()
}

impl From<TicketPayload> for TicketInput {
    fn from(payload: TicketPayload) -> Self {
        Self {
            title: payload.title,
            description: payload.description,
            category: payload.category,
            status: payload.status,
            resolution: payload.resolution,
            assigned_to: payload.assigned_to.map(UserId::new),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LimitQuery {
    limit: Option<usize>,
}

#[instrument(name = "GET /tickets", skip(app_state))]
async fn list_tickets(
    user: AuthUser,
    State(app_state): State<AppState>,
    Query(query): Query<ListTicketsQuery>,
) -> Json<Vec<TicketResponse>> {
    let assigned_to = query.assigned_to.map(UserId::new);
    let tickets = app_state
        .ticket_service
        .list(user.identity(), assigned_to.as_ref())
        .await;

    Json(tickets.into_iter().map(Into::into).collect())
}

#[instrument(name = "POST /tickets", skip(app_state))]
async fn create_ticket(
    user: AuthUser,
    State(app_state): State<AppState>,
    Json(body): Json<TicketPayload>,
) -> Result<(StatusCode, Json<TicketResponse>), ApiError> {
    let ticket = app_state
        .ticket_service
        .create(user.identity(), body.into())
        .await?;

    Ok((StatusCode::CREATED, Json(ticket.into())))
}

#[instrument(name = "GET /tickets/:id", skip(app_state))]
async fn get_ticket(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TicketDetailResponse>, ApiError> {
    let id = TicketId::new(id);
    let ticket = app_state.ticket_service.get(user.identity(), &id).await?;
    let comments = app_state
        .ticket_service
        .comments(user.identity(), &id)
        .await?;

    Ok(Json(TicketDetailResponse {
        ticket: ticket.into(),
        comments: comments.into_iter().map(Into::into).collect(),
    }))
}

#[instrument(name = "PUT /tickets/:id", skip(app_state))]
async fn update_ticket(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<TicketPayload>,
) -> Result<Json<TicketResponse>, ApiError> {
    let ticket = app_state
        .ticket_service
        .update(user.identity(), &TicketId::new(id), body.into())
        .await?;

    Ok(Json(ticket.into()))
}

#[instrument(name = "DELETE /tickets/:id", skip(app_state))]
async fn delete_ticket(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    app_state
        .ticket_service
        .delete(user.identity(), &TicketId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[instrument(name = "GET /tickets/:id/suggested-workflows", skip(app_state))]
async fn suggested_workflows(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<SuggestedWorkflowResponse>>, ApiError> {
    let ticket = app_state
        .ticket_service
        .get(user.identity(), &TicketId::new(id))
        .await?;
    let limit = app_state.retrieval.clamp_limit(query.limit);

    let suggestions = app_state
        .retrieval_engine
        .suggest_for(&ticket.query_text(), limit)
        .await?;

    Ok(Json(suggestions.into_iter().map(Into::into).collect()))
}
