//! Browser-facing relay in front of the GPU augmentation service.

pub mod artifact_store;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod preview;
pub mod remote;
pub mod routes_data;
pub mod routes_performance;
pub mod routes_upload;
pub mod state;
pub mod types;

use axum::{extract::DefaultBodyLimit, routing::{get, post}, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeFile;

pub use state::{AppState, SharedState};

pub fn build_router(state: SharedState) -> Router {
    let templates = state.config.templates_dir.clone();
    // axum caps bodies at 2 MiB unless told otherwise
    let upload_limit = match state.config.max_upload_bytes {
        Some(max) => DefaultBodyLimit::max(max),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route_service("/", ServeFile::new(templates.join("file.html")))
        .route_service("/dashboard", ServeFile::new(templates.join("dashboard.html")))
        .route("/upload", post(routes_upload::post_upload).layer(upload_limit))
        .route("/download", get(routes_upload::get_download))
        .route("/performance", get(routes_performance::get_performance))
        .route("/data_routes/t-sne", get(routes_data::get_tsne))
        .route("/data_routes/augmentation", get(routes_data::get_augmentation))
        .route("/data_routes/chatbot", post(routes_data::post_chatbot))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
