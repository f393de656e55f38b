use std::sync::Arc;

use crate::artifact_store::ArtifactStore;
use crate::config::AppConfig;
use crate::remote::{AugmentService, HttpAugmentService, RemoteError};

pub type SharedState = Arc<AppState>;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub remote: Arc<dyn AugmentService>,
    pub store: ArtifactStore,
}

impl AppState {
    pub fn new(config: AppConfig, remote: Arc<dyn AugmentService>) -> Self {
        let store = ArtifactStore::new(config.user_data_dir.clone());
        Self { config, remote, store }
    }

    /// State talking to the configured remote service over HTTP.
    pub fn from_config(config: AppConfig) -> Result<Self, RemoteError> {
        let remote = HttpAugmentService::new(config.remote_url.clone(), config.remote_timeout)?;
        Ok(Self::new(config, Arc::new(remote)))
    }
}
