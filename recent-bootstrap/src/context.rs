use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use recent_application::AppState;
use recent_infrastructure::{AppConfig, FileRecordStore, VortexStatsFetcher};

pub struct AppContext {
    pub config: AppConfig,
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        Self::from_config(config)
    }

    pub fn from_config(config: AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config();
        let store = Arc::new(FileRecordStore::new(&config.data_dir));
        let fetcher = Arc::new(VortexStatsFetcher::new(
            config.vortex_url.clone(),
            Duration::from_secs(config.fetch_timeout_seconds),
        )?);
        let state = AppState::new(runtime_config, store, fetcher);

        Ok(Self { config, state })
    }
}
