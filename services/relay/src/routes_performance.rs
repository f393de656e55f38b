use axum::extract::State;
use axum::Json;
use evalmetrics::{normalize, DisplayMetric, MetricsTable};
use tracing::debug;

use crate::error::{RelayError, RelayResult};
use crate::state::SharedState;

pub async fn get_performance(State(state): State<SharedState>) -> RelayResult<Json<Vec<DisplayMetric>>> {
    let resp = state.remote.performance().await?;
    if !resp.status.is_success() {
        return Err(RelayError::RemoteCall(format!(
            "Remote performance request failed: HTTP {}",
            resp.status
        )));
    }

    let table = MetricsTable::from_json(&resp.json()?)?;
    let rows = normalize(&table);
    debug!(models = rows.len(), "performance: normalized");
    Ok(Json(rows))
}
