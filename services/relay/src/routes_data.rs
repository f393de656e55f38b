use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::error::{RelayError, RelayResult};
use crate::preview::reshape_rows;
use crate::routes_upload::DEFAULT_SENTINEL;
use crate::state::SharedState;
use crate::types::{AugPair, AugmentationQuery};

type Envelope = (StatusCode, Json<Value>);

pub async fn get_tsne(State(state): State<SharedState>) -> Envelope {
    let fetched = match state.remote.tsne().await {
        Ok(resp) if resp.status.is_success() => resp,
        Ok(resp) => {
            return tsne_failure(format!("HTTP {} from remote t-SNE route", resp.status));
        }
        Err(e) => return tsne_failure(e.to_string()),
    };

    match fetched.json() {
        Ok(data) => (
            StatusCode::OK,
            Json(json!({ "message": "fetch Done.", "data": data })),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Invalid JSON response from remote server." })),
        ),
    }
}

fn tsne_failure(error: String) -> Envelope {
    warn!(error=%error, "t-sne: remote fetch failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "message": "Failed to fetch t-SNE data from remote server.",
            "error": error,
        })),
    )
}

pub async fn get_augmentation(
    State(state): State<SharedState>,
    Query(q): Query<AugmentationQuery>,
) -> RelayResult<Json<Vec<AugPair>>> {
    let aug_type = q.augmentation_type.unwrap_or_else(|| DEFAULT_SENTINEL.to_string());
    if aug_type == DEFAULT_SENTINEL {
        return Ok(Json(vec![AugPair::empty()]));
    }

    let payload = json!({ "augmentationType": aug_type });
    let resp = state.remote.augdata(&payload).await?;
    if !resp.status.is_success() {
        return Err(RelayError::RemoteCall(format!(
            "Remote augmentation request failed: HTTP {}",
            resp.status
        )));
    }

    let rows = reshape_rows(&resp.json()?).map_err(RelayError::RemoteCall)?;
    info!(aug_type=%aug_type, rows=rows.len(), "augmentation: preview relayed");
    Ok(Json(rows))
}

pub async fn post_chatbot(
    State(state): State<SharedState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Envelope {
    let Json(client_data) = match body {
        Ok(b) => b,
        Err(e) => return chatbot_error(StatusCode::BAD_REQUEST, e.body_text()),
    };

    let Some(aug_type) = client_data.get("augmentationType") else {
        return chatbot_error(StatusCode::BAD_REQUEST, "Missing field: augmentationType".to_string());
    };
    info!(aug_type=%aug_type, "chatbot: relaying");

    let resp = match state.remote.chatbot(&client_data).await {
        Ok(r) => r,
        Err(e) => return chatbot_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };

    if !resp.is_ok() {
        return (
            resp.status,
            Json(json!({ "status": "fail", "message": "Error from remote server" })),
        );
    }

    match resp.json() {
        Ok(data) => (StatusCode::OK, Json(json!({ "status": "success", "data": data }))),
        Err(e) => chatbot_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

fn chatbot_error(status: StatusCode, message: String) -> Envelope {
    (status, Json(json!({ "status": "error", "message": message })))
}
