use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

use crate::domain::{DocumentError, StoreError, SuggestionError, TicketError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The embedding service or vector index could not be reached.
    RetrievalUnavailable,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<ErrorCode>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: Option<ErrorCode>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    fn retrieval_unavailable(message: impl Into<String>) -> Self {
        Self::service_unavailable(message).with_code(ErrorCode::RetrievalUnavailable)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::not_found(err.to_string()),
            StoreError::AlreadyExists { .. } => Self::conflict(err.to_string()),
        }
    }
}

impl From<SuggestionError> for ApiError {
    fn from(err: SuggestionError) -> Self {
        match err {
            SuggestionError::NotFound(message) => Self::not_found(message),
            SuggestionError::Conflict(message) => Self::conflict(message),
            SuggestionError::EmbeddingUnavailable(ref message)
            | SuggestionError::IndexUnavailable(ref message) => {
                tracing::error!(error = %message, "Retrieval failed");
                Self::retrieval_unavailable(err.to_string())
            }
        }
    }
}

impl From<TicketError> for ApiError {
    fn from(err: TicketError) -> Self {
        match err {
            TicketError::NotFound(message) => Self::not_found(message),
            TicketError::Forbidden(_) => Self::forbidden(err.to_string()),
            TicketError::InvalidInput(_) => Self::bad_request(err.to_string()),
            TicketError::Conflict(message) => Self::conflict(message),
        }
    }
}

impl From<DocumentError> for ApiError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::UnsupportedType(_) => {
                Self::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, err.to_string())
            }
            DocumentError::Empty => Self::bad_request(err.to_string()),
            DocumentError::Embedding(_) | DocumentError::Index(_) => {
                tracing::error!(error = %err, "Document ingestion failed");
                Self::retrieval_unavailable(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_failures_are_503_with_code() {
        let err = ApiError::from(SuggestionError::IndexUnavailable("refused".into()));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.code, Some(ErrorCode::RetrievalUnavailable));
    }

    #[test]
    fn domain_errors_map_to_statuses() {
        assert_eq!(
            ApiError::from(StoreError::not_found("feedback", "x")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(StoreError::already_exists("ticket", "x")).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(TicketError::Forbidden("nope")).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(TicketError::InvalidInput("title".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(DocumentError::UnsupportedType(".pdf".into())).status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
    }
}
