use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    adapters::inbound::http::{ChatEchoResponse, ChatRespondResponse},
    app_state::AppState,
    auth::AuthUser,
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(echo))
        .route("/respond", post(respond))
}

#[derive(Debug, Deserialize)]
struct EchoPayload {
    message: String,
}

#[derive(Debug, Deserialize)]
struct RespondPayload {
    question: String,
}

#[instrument(name = "POST /chatbot", skip(_user))]
async fn echo(_user: AuthUser, Json(body): Json<EchoPayload>) -> Json<ChatEchoResponse> {
    Json(ChatEchoResponse {
        response: format!("Echo: {}", body.message),
    })
}

#[instrument(name = "POST /chatbot/respond", skip(app_state))]
async fn respond(
    _user: AuthUser,
    State(app_state): State<AppState>,
    Json(body): Json<RespondPayload>,
) -> Result<Json<ChatRespondResponse>, ApiError> {
    if body.question.trim().is_empty() {
        return Err(ApiError::bad_request("question is required"));
    }

    let answer = app_state.chat_service.respond(&body.question).await?;
    Ok(Json(answer.into()))
}
