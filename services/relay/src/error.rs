use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::remote::RemoteError;
use crate::types::AugType;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Please select an augmentation type.")]
    MissingAugType,

    #[error("File not found for augType: {0}")]
    ArtifactNotFound(String),

    #[error("Failed to send file to remote server")]
    RemoteUploadFailed,

    #[error("Failed to download file for augType: {0}")]
    AugmentFetchFailed(AugType),

    /// Network failure or unreadable payload; the message reaches the client as-is.
    #[error("{0}")]
    RemoteCall(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Metrics(#[from] evalmetrics::MetricsError),
}

impl From<RemoteError> for RelayError {
    fn from(e: RemoteError) -> Self {
        RelayError::RemoteCall(e.to_string())
    }
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::BadRequest(_) | RelayError::MissingAugType => StatusCode::BAD_REQUEST,
            RelayError::ArtifactNotFound(_) => StatusCode::NOT_FOUND,
            RelayError::RemoteUploadFailed
            | RelayError::AugmentFetchFailed(_)
            | RelayError::RemoteCall(_)
            | RelayError::Io(_)
            | RelayError::Metrics(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type RelayResult<T> = Result<T, RelayError>;
