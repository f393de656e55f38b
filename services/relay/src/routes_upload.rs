use axum::body::Body;
use axum::extract::{Multipart, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tokio_util::io::ReaderStream;
use tracing::info;

use crate::error::{RelayError, RelayResult};
use crate::orchestrator::{run_upload_cycle, IncomingFile};
use crate::state::SharedState;
use crate::types::{DownloadQuery, UploadResponse};

/// Sentinel the page sends while no augmentation type is selected.
pub const DEFAULT_SENTINEL: &str = "default";

pub async fn post_upload(
    State(state): State<SharedState>,
    mut mp: Multipart,
) -> RelayResult<(StatusCode, Json<UploadResponse>)> {
    let mut file: Option<IncomingFile> = None;

    while let Some(field) = mp.next_field().await.map_err(|e| RelayError::BadRequest(e.to_string()))? {
        if field.name() == Some("file") {
            let file_name = field.file_name().map(str::to_string);
            let bytes = field.bytes().await.map_err(|e| RelayError::BadRequest(e.to_string()))?;
            file = Some(IncomingFile { file_name, bytes });
            // first `file` part wins
            break;
        }
    }

    let out = run_upload_cycle(state.remote.as_ref(), &state.store, file.as_ref()).await?;
    Ok((StatusCode::OK, Json(out)))
}

pub async fn get_download(
    State(state): State<SharedState>,
    Query(q): Query<DownloadQuery>,
) -> RelayResult<Response> {
    let aug_type = q.aug_type.unwrap_or_else(|| DEFAULT_SENTINEL.to_string());
    if aug_type == DEFAULT_SENTINEL {
        return Err(RelayError::MissingAugType);
    }

    let (path, name) = state
        .store
        .locate(&aug_type)
        .await?
        .ok_or_else(|| RelayError::ArtifactNotFound(aug_type.clone()))?;

    let file = tokio::fs::File::open(&path).await?;
    info!(aug_type=%aug_type, path=%path.display(), "download: serving artifact");

    let body = Body::from_stream(ReaderStream::new(file));
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{name}\"")),
        ],
        body,
    )
        .into_response())
}
