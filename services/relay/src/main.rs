use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use relay::config::AppConfig;
use relay::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env()?;

    let state = AppState::from_config(cfg.clone()).context("Failed to build remote client")?;
    state
        .store
        .ensure_dir()
        .await
        .with_context(|| format!("Failed to create {}", cfg.user_data_dir.display()))?;

    info!(
        remote=%state.remote.base_url(),
        user_data=%state.store.dir().display(),
        "relay: configured"
    );

    let app = build_router(Arc::new(state));

    let addr = &cfg.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("relay listening on http://{addr}");
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
