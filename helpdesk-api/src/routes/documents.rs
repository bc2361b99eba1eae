use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use tracing::instrument;

use crate::{
    adapters::inbound::http::UploadDocumentResponse, app_state::AppState, auth::AuthUser,
    routes::ApiError,
};

const UPLOAD_BODY_LIMIT: usize = 10 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload-doc", post(upload_document))
        .route_layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}

#[instrument(name = "POST /ai/upload-doc", skip(app_state, multipart))]
async fn upload_document(
    _user: AuthUser,
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadDocumentResponse>, ApiError> {
    let document_service = app_state
        .document_service
        .clone()
        .ok_or_else(|| ApiError::service_unavailable("Document storage is not configured"))?;

    let (file_name, contents) = extract_file_from_multipart(&mut multipart).await?;
    let inserted = document_service.ingest(&file_name, &contents).await?;

    Ok(Json(UploadDocumentResponse { inserted }))
}

async fn extract_file_from_multipart(
    multipart: &mut Multipart,
) -> Result<(String, Vec<u8>), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request("failed to parse multipart field"))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|_| ApiError::bad_request("failed to read uploaded file"))?;

        return Ok((file_name, bytes.to_vec()));
    }

    Err(ApiError::bad_request("missing file field"))
}
