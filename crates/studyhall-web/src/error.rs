use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use studyhall_core::{AiError, Error, ExtractError, StoreError};
use tracing::{error, warn};

/// A user-facing API error: an HTTP status plus a message suitable for a
/// transient notification. Every failure is scoped to the single request;
/// nothing is retried automatically.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "missing or empty x-user-id header".into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::Extract(ExtractError::UnsupportedFormat(_)) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            Error::Extract(ExtractError::Extraction(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Ai(AiError::MissingCredential) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Ai(AiError::Upstream { .. }) | Error::Ai(AiError::Http(_)) => {
                StatusCode::BAD_GATEWAY
            }
            Error::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            Error::Store(StoreError::Sqlite(_) | StoreError::Io(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            error!(error = %err, "request failed");
        } else {
            warn!(error = %err, "request rejected");
        }

        Self {
            status,
            message: err.to_string(),
        }
    }
}
