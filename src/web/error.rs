use crate::services::storage::StorageError;
use crate::services::upload::UploadError;
use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The upload request itself is unusable (no file, wrong type, too big).
    #[error("{0}")]
    BadUpload(String),

    /// The server could not store an otherwise valid upload.
    #[error("{0}")]
    Upload(String),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Validation(_) | Self::BadUpload(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::Upload(_) | Self::Template(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::Storage(StorageError::Malformed(_)) => "Stored media list is unreadable".to_string(),
            Self::Storage(_) => "Storage error".to_string(),
            Self::Template(_) | Self::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Application error: {:?}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, self);
        }

        let body = Json(json!({ "error": self.public_message() }));
        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        Self::BadUpload(err.body_text())
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Storage(StorageError::NotConfigured(msg)) => Self::Upload(msg),
            UploadError::Storage(e) => Self::Storage(e),
            other => Self::BadUpload(other.to_string()),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
